/// トリガー呼び出しのローカル再実行
///
/// 保存しておいた呼び出し引数（JSON）を読み込み、Lambdaと同じハンドラーで処理する。
/// 転送されなかったレコードの調査や、キューへの手動再送に使う。
///
/// # ローカル実行
/// ```bash
/// # 送信内容の確認のみ（SQSは呼ばない）
/// cargo run --bin replay -- --input invocation.json --dry-run
///
/// # 実際に送信（AWS認証情報が必要）
/// cargo run --bin replay -- --input invocation.json
/// ```
use std::path::PathBuf;

use clap::Parser;
use lambda_runtime::Error;
use serde_json::Value;
use tracing::{error, info};
use trigger_handler::application::{FanoutHandler, InvocationOutcome, SummaryPolicy};
use trigger_handler::domain::ChangeFilter;
use trigger_handler::infrastructure::{
    init_cli_logging, AwsSqsPublisher, DryRunPublisher, HandlerConfig, QueuePublisher,
};

/// コマンドライン引数
#[derive(Parser, Debug)]
#[command(name = "replay")]
#[command(about = "保存した呼び出し引数をファンアウトハンドラーで再実行")]
struct CliArgs {
    /// 呼び出し引数のJSONファイル
    #[arg(long, short = 'i')]
    input: PathBuf,

    /// SQSへ送信せず、送信内容をログに出力する
    #[arg(long)]
    dry_run: bool,

    /// 送信完了を待たずに集計する
    /// 環境変数AWAIT_DISPATCHESより優先される
    #[arg(long)]
    report_immediately: bool,

    /// 受け付けるeventSource
    /// 環境変数EXPECTED_EVENT_SOURCEより優先される
    #[arg(long)]
    event_source: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_cli_logging();

    let args = CliArgs::parse();
    let config = HandlerConfig::from_env()?;

    let event_source = args
        .event_source
        .clone()
        .unwrap_or_else(|| config.expected_event_source().to_string());
    let policy = if args.report_immediately {
        SummaryPolicy::ReportImmediately
    } else {
        SummaryPolicy::from_await_flag(config.await_dispatches())
    };

    let raw = tokio::fs::read_to_string(&args.input).await.map_err(|e| {
        error!(error = %e, path = %args.input.display(), "入力ファイルの読み込みに失敗");
        Error::from(format!("Failed to read {}: {}", args.input.display(), e))
    })?;
    let payload: Value = serde_json::from_str(&raw).map_err(|e| {
        error!(error = %e, "入力ファイルのJSONパースに失敗");
        Error::from(format!("Invalid invocation JSON: {}", e))
    })?;

    info!(
        input = %args.input.display(),
        dry_run = args.dry_run,
        event_source = %event_source,
        summary_policy = ?policy,
        "再実行を開始"
    );

    let filter = ChangeFilter::new(event_source);
    let outcome = if args.dry_run {
        run(DryRunPublisher::new(), filter, policy, payload).await
    } else {
        run(AwsSqsPublisher::from_config().await, filter, policy, payload).await
    };

    match outcome {
        InvocationOutcome::Failed(err) => {
            error!(error = %err, "呼び出し引数が不正");
            Err(err.into())
        }
        outcome => {
            println!("{}", outcome.message());
            Ok(())
        }
    }
}

async fn run<P>(
    publisher: P,
    filter: ChangeFilter,
    policy: SummaryPolicy,
    payload: Value,
) -> InvocationOutcome
where
    P: QueuePublisher + 'static,
{
    FanoutHandler::new(publisher, filter, policy)
        .handle(payload)
        .await
}
