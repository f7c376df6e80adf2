// アプリケーション層モジュール
pub mod fanout_handler;
pub mod invocation_input;
pub mod invocation_status;

// 再エクスポート
pub use fanout_handler::{FanoutHandler, SummaryPolicy};
pub use invocation_input::{GateStop, InputError, InvocationInput};
pub use invocation_status::{InvocationOutcome, InvocationStatus, InvocationSummary, StatusSnapshot};
