use std::path::{Path, PathBuf};

use grandprix_core::{
    CoreError, Dataset, EvaluationResult, Result, Task, TaskRegistry, TARGET_COLUMN,
};
use grandprix_metrics::{normalize_supervised_score, supervised_details, PreprocessingValidator};
use grandprix_runner::{Invocation, RunOutcome, RunnerConfig, RunnerError, SandboxRunner};
use grandprix_storage::{read_dataset, DatasetStore, Split};

/// The one entry point external callers use. A pure function (modulo the
/// sandbox subprocess) from `(task_id, artifact path)` to an
/// `EvaluationResult`; it never owns persisted state.
pub struct Evaluator {
    datasets: DatasetStore,
    runner: SandboxRunner,
    validator: PreprocessingValidator,
}

impl Evaluator {
    pub fn new(data_dir: impl Into<PathBuf>, runner_config: RunnerConfig) -> Self {
        Self {
            datasets: DatasetStore::new(data_dir),
            runner: SandboxRunner::new(runner_config),
            validator: PreprocessingValidator::new(),
        }
    }

    /// Evaluate one submission against one task.
    ///
    /// Only NotFound conditions (unknown task id, missing dataset, missing
    /// artifact) return `Err`; they are caller contract violations and
    /// short-circuit before any artifact execution. Every artifact failure
    /// (load, runtime, timeout, resource) folds into an error-status result
    /// with a zero score; nothing the artifact does propagates as a fault.
    pub async fn evaluate(
        &self,
        task_id: u32,
        submission_path: &Path,
    ) -> Result<EvaluationResult> {
        let task = TaskRegistry::describe(task_id)?;

        if !submission_path.exists() {
            return Err(CoreError::NotFound(format!(
                "Submission file not found: {}",
                submission_path.display()
            )));
        }

        tracing::info!(task_id, artifact = %submission_path.display(), "Evaluating submission");

        let result = if task.kind.is_supervised() {
            self.evaluate_supervised(task, submission_path).await?
        } else {
            self.evaluate_preprocessing(task, submission_path).await?
        };

        tracing::info!(
            task_id,
            score = result.score,
            status = result.status.as_str(),
            "Evaluation finished"
        );
        Ok(result)
    }

    /// Task 0: run the transform entry point, then score the transformed
    /// table against the preprocessing checks.
    async fn evaluate_preprocessing(
        &self,
        task: &Task,
        submission_path: &Path,
    ) -> Result<EvaluationResult> {
        let original = self.datasets.load(task.id, Split::Train)?;

        let scratch = tempfile::tempdir()
            .map_err(|e| CoreError::Internal(format!("scratch dir: {}", e)))?;
        let output_csv = scratch.path().join("transformed.csv");

        let invocation = Invocation::Preprocess {
            input_csv: self.datasets.path_for(task.id, Split::Train),
            output_csv: output_csv.clone(),
        };

        match self.runner.run(submission_path, &invocation).await {
            Ok(RunOutcome::Preprocess { .. }) => {
                let transformed = match read_dataset(&output_csv) {
                    Ok(ds) => ds,
                    Err(e) => return Ok(self.failure(task, e.to_string())),
                };
                let outcome = self.validator.validate(&original, &transformed);
                Ok(EvaluationResult::success(
                    task.id,
                    outcome.score,
                    outcome.details(),
                ))
            }
            Ok(other) => Ok(self.failure(task, format!("unexpected sandbox outcome: {:?}", other))),
            Err(e) => Ok(self.runner_failure(task, e)),
        }
    }

    /// Tasks 1-3: train then evaluate inside the sandbox, then normalize
    /// the raw metric into the leaderboard score.
    async fn evaluate_supervised(
        &self,
        task: &Task,
        submission_path: &Path,
    ) -> Result<EvaluationResult> {
        let train = self.datasets.load(task.id, Split::Train)?;
        let test = self.datasets.load(task.id, Split::Test)?;

        // A dataset without the designated target column is a caller-input
        // problem, surfaced as an evaluation error rather than a loader
        // error.
        if let Some(missing) = missing_target(&train, &test) {
            return Ok(self.failure(
                task,
                format!("{} dataset has no '{}' column", missing, TARGET_COLUMN),
            ));
        }

        let invocation = Invocation::TrainEvaluate {
            train_csv: self.datasets.path_for(task.id, Split::Train),
            test_csv: self.datasets.path_for(task.id, Split::Test),
            target: TARGET_COLUMN.to_string(),
        };

        match self.runner.run(submission_path, &invocation).await {
            Ok(RunOutcome::TrainEvaluate { metric, model_type }) => {
                let score = normalize_supervised_score(metric);
                Ok(EvaluationResult::success(
                    task.id,
                    score,
                    supervised_details(&model_type, task.metric),
                ))
            }
            Ok(other) => Ok(self.failure(task, format!("unexpected sandbox outcome: {:?}", other))),
            Err(e) => Ok(self.runner_failure(task, e)),
        }
    }

    fn failure(&self, task: &Task, message: String) -> EvaluationResult {
        EvaluationResult::failure(
            task.id,
            format!("Task {} evaluation failed: {}", task.id, message),
        )
    }

    fn runner_failure(&self, task: &Task, err: RunnerError) -> EvaluationResult {
        tracing::warn!(task_id = task.id, error = %err, "Sandbox run failed");
        self.failure(task, err.to_string())
    }
}

fn missing_target(train: &Dataset, test: &Dataset) -> Option<&'static str> {
    if !train.has_column(TARGET_COLUMN) {
        Some("train")
    } else if !test.has_column(TARGET_COLUMN) {
        Some("test")
    } else {
        None
    }
}
