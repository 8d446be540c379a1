#[derive(Debug, Clone)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    TaskStart { total_steps: u64 },
    TaskAdvance { steps: u64 },
    TaskFinish,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards progress events to an optional observer.
///
/// Reporting never feeds back into the search; a reporter without a callback
/// discards every event.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    /// Whether anyone is listening; lets hot loops skip building events.
    pub fn is_enabled(&self) -> bool {
        self.callback.is_some()
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn reporter_without_callback_is_disabled() {
        let reporter = ProgressReporter::new();
        assert!(!reporter.is_enabled());
        reporter.report(Progress::PhaseFinish);
    }

    #[test]
    fn callback_receives_events_in_order() {
        let seen = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event: Progress| {
            if let Progress::TaskAdvance { steps } = event {
                seen.lock().unwrap().push(steps);
            }
        }));

        assert!(reporter.is_enabled());
        reporter.report(Progress::TaskAdvance { steps: 3 });
        reporter.report(Progress::Message("ignored".to_string()));
        reporter.report(Progress::TaskAdvance { steps: 5 });
        drop(reporter);

        assert_eq!(seen.into_inner().unwrap(), vec![3, 5]);
    }
}
