pub mod combine_comments_pipeline;
pub mod combine_pipeline;
pub mod first_pages_pipeline;
pub mod labels_file_pipeline;
pub mod labels_pipeline;

pub use combine_comments_pipeline::CombineCommentsPipeline;
pub use combine_pipeline::CombinePipeline;
pub use first_pages_pipeline::FirstPagesPipeline;
pub use labels_file_pipeline::LabelsFilePipeline;
pub use labels_pipeline::LabelsPipeline;
