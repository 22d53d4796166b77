pub mod etl;
pub mod output;
pub mod records;

pub use crate::domain::model::{InputRecord, LoadOutcome, OutputArtifact, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;

#[cfg(test)]
pub(crate) mod testing {
    use crate::core::{ConfigProvider, Storage};
    use crate::utils::error::{Result, ToolError};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    pub struct MockStorage {
        files: Arc<Mutex<HashMap<String, String>>>,
        fail_writes: bool,
    }

    impl MockStorage {
        pub fn with_file(path: &str, contents: &str) -> Self {
            let storage = Self::default();
            storage
                .files
                .lock()
                .unwrap()
                .insert(path.to_string(), contents.to_string());
            storage
        }

        pub fn failing_writes() -> Self {
            Self {
                fail_writes: true,
                ..Self::default()
            }
        }

        pub fn get_file(&self, path: &str) -> Option<String> {
            self.files.lock().unwrap().get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<String> {
            self.get_file(path).ok_or_else(|| {
                ToolError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("{} not found", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &str) -> std::io::Result<()> {
            if self.fail_writes {
                return Err(std::io::Error::from(std::io::ErrorKind::PermissionDenied));
            }
            self.files
                .lock()
                .unwrap()
                .insert(path.to_string(), data.to_string());
            Ok(())
        }
    }

    pub struct TestConfig {
        pub input_path: String,
        pub output_path: String,
        pub strict_write: bool,
    }

    impl Default for TestConfig {
        fn default() -> Self {
            Self {
                input_path: "input.csv".to_string(),
                output_path: "output.txt".to_string(),
                strict_write: false,
            }
        }
    }

    impl ConfigProvider for TestConfig {
        fn input_path(&self) -> &str {
            &self.input_path
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn viewer_url(&self) -> &str {
            "https://fumen.zui.jp/?"
        }

        fn strict_write(&self) -> bool {
            self.strict_write
        }
    }
}
