use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);
/// tokio 的 interval 不接受 0
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

pub const FRAMES: [&str; 17] = [
    "[        ]",
    "[=       ]",
    "[===     ]",
    "[====    ]",
    "[=====   ]",
    "[======  ]",
    "[======= ]",
    "[========]",
    "[ =======]",
    "[  ======]",
    "[   =====]",
    "[    ====]",
    "[     ===]",
    "[      ==]",
    "[       =]",
    "[        ]",
    "[        ]",
];

/// Terminal animation shown while an external command runs.
pub struct LoadingBar {
    bar: ProgressBar,
    interval: Duration,
}

impl LoadingBar {
    pub fn new(interval: Duration) -> Self {
        Self::with_target(ProgressDrawTarget::stderr(), interval)
    }

    /// 不輸出任何畫面 (非互動模式或測試)
    pub fn hidden() -> Self {
        Self::with_target(ProgressDrawTarget::hidden(), DEFAULT_INTERVAL)
    }

    fn with_target(target: ProgressDrawTarget, interval: Duration) -> Self {
        let bar = ProgressBar::with_draw_target(None, target);
        if let Ok(style) = ProgressStyle::with_template("{msg}") {
            bar.set_style(style);
        }
        Self {
            bar,
            interval: interval.max(MIN_INTERVAL),
        }
    }

    pub fn frame(idx: usize) -> &'static str {
        FRAMES[idx % FRAMES.len()]
    }

    /// Redraws one frame per interval until `token` is cancelled, then clears
    /// the line. Returns the number of frames drawn.
    pub async fn run(self, token: CancellationToken) -> usize {
        let mut ticker = tokio::time::interval(self.interval);
        let mut idx = 0;

        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => break,
                _ = ticker.tick() => {
                    self.bar.set_message(Self::frame(idx));
                    idx += 1;
                }
            }
        }

        self.bar.finish_and_clear();
        idx
    }
}

impl Default for LoadingBar {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}

/// Drives `future` and `bar` together on the current task. The bar's token is
/// cancelled as soon as the future resolves, whatever its output.
pub async fn with_loading_bar<F, T>(bar: LoadingBar, future: F) -> T
where
    F: Future<Output = T>,
{
    let token = CancellationToken::new();
    let display = bar.run(token.clone());
    let work = async {
        let output = future.await;
        token.cancel();
        output
    };

    let (output, frames) = tokio::join!(work, display);
    tracing::trace!("loading bar stopped after {} frames", frames);
    output
}
