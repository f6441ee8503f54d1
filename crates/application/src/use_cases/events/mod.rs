mod get_backlog;
mod purge_published;

pub use get_backlog::GetEventBacklogUseCase;
pub use purge_published::PurgePublishedEventsUseCase;
