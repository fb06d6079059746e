// Quill: rule-based comment moderation for a blog.
//
// This is the library root. `moderation` is the pure scorer; the other
// modules store comments with their verdicts and present them.

pub mod comments;
pub mod config;
pub mod db;
pub mod moderation;
pub mod output;
pub mod pipeline;
pub mod status;
