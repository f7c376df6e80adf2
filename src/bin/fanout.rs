/// DynamoDBトリガー ファンアウトLambda関数
///
/// ハーベスト済みレコードテーブルのストリームイベントを受け取り、
/// XMLが更新されたレコードを呼び出し引数で指定されたすべてのSQSキューへ送信する。
///
/// # 入力
/// `{ "queues": ["https://sqs..."], "event": { "Records": [...] } }`
///
/// # 環境変数
/// - EXPECTED_EVENT_SOURCE: 受け付けるeventSource（デフォルト: aws:dynamodb）
/// - AWAIT_DISPATCHES: 送信完了を待って集計するか（デフォルト: true）
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info};
use trigger_handler::application::{FanoutHandler, InvocationOutcome, SummaryPolicy};
use trigger_handler::domain::ChangeFilter;
use trigger_handler::infrastructure::{init_logging, AwsSqsPublisher, HandlerConfig};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    let config = match HandlerConfig::from_env() {
        Ok(config) => {
            info!(
                expected_event_source = config.expected_event_source(),
                await_dispatches = config.await_dispatches(),
                "ハンドラー設定を読み込み"
            );
            config
        }
        Err(err) => {
            error!(error = %err, "ハンドラー設定読み込み失敗");
            return Err(err.into());
        }
    };

    // SQSクライアントはwarm start間で再利用する
    let publisher = AwsSqsPublisher::from_config().await;
    let fanout = FanoutHandler::new(
        publisher,
        ChangeFilter::new(config.expected_event_source()),
        SummaryPolicy::from_await_flag(config.await_dispatches()),
    );
    let fanout = &fanout;

    let func = service_fn(move |event: LambdaEvent<Value>| async move {
        handler(fanout, event).await
    });
    lambda_runtime::run(func).await?;
    Ok(())
}

/// Lambda関数のメインハンドラー
///
/// 引数の形式エラーのみLambdaのエラーとして返す。
/// レコードのスキップや送信失敗は成功扱いで、件数を結果メッセージに含める。
async fn handler(
    fanout: &FanoutHandler<AwsSqsPublisher>,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    let request_id = event.context.request_id.clone();

    match fanout.handle(event.payload).await {
        InvocationOutcome::Failed(err) => {
            error!(request_id = %request_id, error = %err, "呼び出し引数が不正");
            Err(err.into())
        }
        outcome => {
            let message = outcome.message();
            info!(request_id = %request_id, result = %message, "呼び出し完了");
            Ok(Value::String(message))
        }
    }
}
