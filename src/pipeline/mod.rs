// Comment pipelines — the steps that combine moderation with storage.
//
// Each pipeline takes an open connection, does its work synchronously and
// reports what it did. Nothing here prints; the CLI decides how to show it.

pub mod rescore;
pub mod review;
pub mod submit;
