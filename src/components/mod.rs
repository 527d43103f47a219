pub mod already_signed_in;
pub mod notify;

pub use notify::{ConsoleNotifier, MemoryNotifier, Notifier, Tee, Toast, ToastVariant};
