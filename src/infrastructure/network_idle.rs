//! 网络空闲检测
//!
//! 订阅页面的网络事件，统计未完成的请求数；
//! 当没有进行中的请求并持续静默一段时间后，认为页面资源已加载完毕

use std::collections::HashSet;
use std::time::Duration;

use chromiumoxide::cdp::browser_protocol::network::{
    EventLoadingFailed, EventLoadingFinished, EventRequestWillBeSent,
};
use chromiumoxide::listeners::EventStream;
use chromiumoxide::Page;
use futures::{Stream, StreamExt};
use tokio::time::{sleep, sleep_until, Instant};
use tracing::debug;

use crate::error::{AppResult, BrowserError};

/// 网络空闲检测器
///
/// 必须在加载内容之前创建，否则会漏掉最早发出的请求
pub struct NetworkIdleWatcher {
    started: EventStream<EventRequestWillBeSent>,
    finished: EventStream<EventLoadingFinished>,
    failed: EventStream<EventLoadingFailed>,
}

impl NetworkIdleWatcher {
    pub async fn attach(page: &Page) -> AppResult<Self> {
        Ok(Self {
            started: page.event_listener::<EventRequestWillBeSent>().await?,
            finished: page.event_listener::<EventLoadingFinished>().await?,
            failed: page.event_listener::<EventLoadingFailed>().await?,
        })
    }

    /// 等待没有进行中的请求并保持 `idle` 时长，超过 `timeout` 返回错误
    pub async fn wait_for_idle(self, idle: Duration, timeout: Duration) -> AppResult<()> {
        let started = self.started.map(|event| {
            debug!("请求开始: {}", event.request.url);
            event.request_id.inner().clone()
        });
        let finished = self.finished.map(|event| event.request_id.inner().clone());
        let failed = self.failed.map(|event| {
            debug!("请求失败: {}", event.error_text);
            event.request_id.inner().clone()
        });

        wait_for_quiet(started, finished, failed, idle, timeout).await
    }
}

/// 进行中的请求
///
/// 不同事件流之间没有顺序保证，结束事件可能先于开始事件到达，
/// 这类请求记在 `settled` 中，随后到达的开始事件直接抵消
#[derive(Debug, Default)]
struct InFlightRequests {
    pending: HashSet<String>,
    settled: HashSet<String>,
}

impl InFlightRequests {
    fn start(&mut self, id: String) {
        if !self.settled.remove(&id) {
            self.pending.insert(id);
        }
    }

    fn finish(&mut self, id: String) {
        if !self.pending.remove(&id) {
            self.settled.insert(id);
        }
    }

    fn len(&self) -> usize {
        self.pending.len()
    }

    fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// 按请求 ID 统计进行中的请求，静默 `idle` 后返回
///
/// 每收到一个事件，静默计时重新开始
pub async fn wait_for_quiet<S, F, E>(
    mut started: S,
    mut finished: F,
    mut failed: E,
    idle: Duration,
    timeout: Duration,
) -> AppResult<()>
where
    S: Stream<Item = String> + Unpin,
    F: Stream<Item = String> + Unpin,
    E: Stream<Item = String> + Unpin,
{
    let deadline = Instant::now() + timeout;
    let mut in_flight = InFlightRequests::default();

    loop {
        let quiet = sleep(idle);
        tokio::select! {
            _ = sleep_until(deadline) => {
                return Err(BrowserError::NetworkIdleTimeout {
                    timeout_ms: timeout.as_millis() as u64,
                    in_flight: in_flight.len(),
                }
                .into());
            }
            Some(id) = started.next() => in_flight.start(id),
            Some(id) = finished.next() => in_flight.finish(id),
            Some(id) = failed.next() => in_flight.finish(id),
            _ = quiet, if in_flight.is_empty() => {
                debug!("网络已空闲");
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use futures::channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};

    const IDLE: Duration = Duration::from_millis(500);
    const TIMEOUT: Duration = Duration::from_secs(30);
    const SLACK: Duration = Duration::from_millis(20);

    fn assert_elapsed(begin: Instant, expected: Duration) {
        let elapsed = begin.elapsed();
        assert!(
            elapsed >= expected && elapsed < expected + SLACK,
            "elapsed {elapsed:?}, expected {expected:?}"
        );
    }

    struct Events {
        started: UnboundedSender<String>,
        finished: UnboundedSender<String>,
        failed: UnboundedSender<String>,
    }

    type Receivers = (
        UnboundedReceiver<String>,
        UnboundedReceiver<String>,
        UnboundedReceiver<String>,
    );

    fn channels() -> (Events, Receivers) {
        let (started, started_rx) = unbounded();
        let (finished, finished_rx) = unbounded();
        let (failed, failed_rx) = unbounded();
        (
            Events {
                started,
                finished,
                failed,
            },
            (started_rx, finished_rx, failed_rx),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn idle_after_trailing_window_with_nothing_in_flight() {
        let (events, (s, f, e)) = channels();
        events.started.unbounded_send("1".into()).unwrap();
        events.finished.unbounded_send("1".into()).unwrap();

        let begin = Instant::now();
        wait_for_quiet(s, f, e, IDLE, TIMEOUT).await.unwrap();

        assert_elapsed(begin, IDLE);
    }

    #[tokio::test(start_paused = true)]
    async fn new_request_resets_idle_timer() {
        let (events, (s, f, e)) = channels();
        tokio::spawn(async move {
            sleep(Duration::from_millis(300)).await;
            events.started.unbounded_send("css".into()).unwrap();
            sleep(Duration::from_millis(100)).await;
            events.finished.unbounded_send("css".into()).unwrap();
            // 保持发送端存活直到等待结束
            sleep(Duration::from_secs(60)).await;
            drop(events);
        });

        let begin = Instant::now();
        wait_for_quiet(s, f, e, IDLE, TIMEOUT).await.unwrap();

        assert_elapsed(begin, Duration::from_millis(400) + IDLE);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_request_clears_entry() {
        let (events, (s, f, e)) = channels();
        events.started.unbounded_send("img".into()).unwrap();
        events.failed.unbounded_send("img".into()).unwrap();

        wait_for_quiet(s, f, e, IDLE, TIMEOUT).await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn finish_before_start_does_not_leave_request_pending() {
        let (events, (s, f, e)) = channels();
        events.finished.unbounded_send("early".into()).unwrap();
        tokio::spawn(async move {
            sleep(Duration::from_millis(10)).await;
            events.started.unbounded_send("early".into()).unwrap();
            sleep(Duration::from_secs(60)).await;
            drop(events);
        });

        wait_for_quiet(s, f, e, IDLE, TIMEOUT).await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_reports_requests_still_in_flight() {
        let (events, (s, f, e)) = channels();
        events.started.unbounded_send("a".into()).unwrap();
        events.started.unbounded_send("b".into()).unwrap();
        events.finished.unbounded_send("a".into()).unwrap();

        let timeout = Duration::from_secs(2);
        let begin = Instant::now();
        let err = wait_for_quiet(s, f, e, IDLE, timeout).await.unwrap_err();

        assert_elapsed(begin, timeout);
        match err {
            AppError::Browser(BrowserError::NetworkIdleTimeout {
                timeout_ms,
                in_flight,
            }) => {
                assert_eq!(timeout_ms, 2000);
                assert_eq!(in_flight, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
        drop(events);
    }
}
