use std::sync::Arc;

use crate::capture::domain::capture_device::CaptureDevice;
use crate::detection::domain::detection_result::DetectionResult;
use crate::detection::domain::presence_detector::{DetectionError, PresenceDetector};
use crate::pipeline::check_presence_use_case::{check_device, CheckError};
use crate::shared::frame::Frame;

/// Checks many independent captures on a pool of worker threads.
///
/// Layout: `main [feed] → workers [capture, detect] → main [reorder]`
///
/// The feed is bounded, so at most `2 * workers` captures wait in the queue
/// while the rest are still unopened. Each capture gets its own verdict in
/// input order; verdicts are never combined.
pub struct BatchPresenceChecker {
    detector: Arc<dyn PresenceDetector>,
    workers: usize,
}

impl BatchPresenceChecker {
    pub fn new(detector: Arc<dyn PresenceDetector>, workers: usize) -> Self {
        Self {
            detector,
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn check(&self, frames: Vec<Frame>) -> Vec<Result<DetectionResult, DetectionError>> {
        let detector = self.detector.as_ref();
        self.run_pool(frames, |frame| detector.detect(&frame))
    }

    /// Opens, grabs from and releases each device on a worker thread, so
    /// decoding runs in parallel with detection.
    pub fn check_devices<D, I>(&self, devices: I) -> Vec<Result<DetectionResult, CheckError>>
    where
        D: CaptureDevice,
        I: IntoIterator<Item = D>,
    {
        let detector = self.detector.as_ref();
        self.run_pool(devices, |device| check_device(detector, device))
    }

    fn run_pool<J, R, I, F>(&self, jobs: I, work: F) -> Vec<R>
    where
        J: Send,
        R: Send,
        I: IntoIterator<Item = J>,
        F: Fn(J) -> R + Sync,
    {
        let jobs = jobs.into_iter();
        let workers = match jobs.size_hint() {
            (_, Some(upper)) => self.workers.min(upper),
            (_, None) => self.workers,
        };
        if workers == 0 {
            return Vec::new();
        }
        log::debug!("Checking captures on {workers} workers");

        let (job_tx, job_rx) = crossbeam_channel::bounded::<(usize, J)>(workers * 2);
        let (result_tx, result_rx) = crossbeam_channel::unbounded();
        let mut fed = 0usize;

        std::thread::scope(|scope| {
            for _ in 0..workers {
                let job_rx = job_rx.clone();
                let result_tx = result_tx.clone();
                let work = &work;
                scope.spawn(move || {
                    for (index, job) in job_rx {
                        if result_tx.send((index, work(job))).is_err() {
                            break;
                        }
                    }
                });
            }
            drop(job_rx);
            drop(result_tx);

            for job in jobs.enumerate() {
                if job_tx.send(job).is_err() {
                    break;
                }
                fed += 1;
            }
            drop(job_tx);
        });

        let mut slots: Vec<Option<R>> = (0..fed).map(|_| None).collect();
        for (index, result) in result_rx {
            slots[index] = Some(result);
        }
        slots
            .into_iter()
            .map(|slot| slot.expect("every job yields exactly one result"))
            .collect()
    }
}
