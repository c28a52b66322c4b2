//! Generation job service
//!
//! The scene builder itself is synchronous and instant, but callers are
//! written against a job-shaped capability: submit a prompt, poll for
//! progress, receive the finished scene. [`SimulatedGeneration`] is the
//! local stand-in for a real generation backend - it walks a fixed list
//! of progress steps and then completes with the procedurally built scene.

use slotmap::SlotMap;

use prompt3d_gen::GenerationOptions;
use prompt3d_scene::SceneNode;

slotmap::new_key_type! {
    /// Generational key identifying a submitted job
    pub struct JobKey;
}

/// A progress tick from a running job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    /// 1-based step number
    pub step: usize,
    /// Total number of steps
    pub total: usize,
    /// Human-readable step description
    pub message: &'static str,
}

/// State change reported by [`GenerationService::advance`]
#[derive(Debug, Clone)]
pub enum JobUpdate {
    /// The job moved one step forward
    Progress(ProgressEvent),
    /// The job finished; the scene is handed to the caller
    Completed { scene: SceneNode },
    /// The job failed and will report no further updates
    Failed { reason: String },
}

/// A prompt-to-scene generation backend
///
/// Poll-driven: callers submit a job, then call [`advance`] until it
/// returns `None`. The terminal update is either `Completed` or `Failed`;
/// after that the key is dead.
///
/// [`advance`]: GenerationService::advance
pub trait GenerationService {
    /// Submit a generation request; never blocks
    fn submit(&mut self, prompt: &str, options: &GenerationOptions) -> JobKey;

    /// Drive the job one step forward
    ///
    /// Returns `None` for unknown or finished jobs.
    fn advance(&mut self, job: JobKey) -> Option<JobUpdate>;
}

const STEPS: [&str; 5] = [
    "Analyzing prompt",
    "Generating base geometry",
    "Adding details",
    "Applying materials",
    "Finalizing model",
];

struct Job {
    prompt: String,
    options: GenerationOptions,
    step: usize,
}

/// Local generation backend that fabricates progress
///
/// Each [`advance`] call emits the next canned step; once the steps are
/// exhausted the job completes with the scene built by the generator and
/// is removed from the registry.
///
/// [`advance`]: GenerationService::advance
#[derive(Default)]
pub struct SimulatedGeneration {
    jobs: SlotMap<JobKey, Job>,
}

impl SimulatedGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of jobs still in flight
    pub fn pending_jobs(&self) -> usize {
        self.jobs.len()
    }
}

impl GenerationService for SimulatedGeneration {
    fn submit(&mut self, prompt: &str, options: &GenerationOptions) -> JobKey {
        let key = self.jobs.insert(Job {
            prompt: prompt.to_string(),
            options: *options,
            step: 0,
        });
        log::info!("Submitted generation job for prompt '{}'", prompt);
        key
    }

    fn advance(&mut self, job: JobKey) -> Option<JobUpdate> {
        let entry = self.jobs.get_mut(job)?;

        if entry.step < STEPS.len() {
            let message = STEPS[entry.step];
            entry.step += 1;
            log::debug!("Job progress {}/{}: {}", entry.step, STEPS.len(), message);
            return Some(JobUpdate::Progress(ProgressEvent {
                step: entry.step,
                total: STEPS.len(),
                message,
            }));
        }

        // Terminal update: build the scene and retire the job
        let entry = self.jobs.remove(job)?;
        let scene = prompt3d_gen::build(&entry.prompt, &entry.options);
        log::info!(
            "Job completed: '{}' -> {} primitives",
            entry.prompt,
            scene.primitive_count()
        );
        Some(JobUpdate::Completed { scene })
    }
}
