use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Highest valid task id. Tasks are statically defined, never mutated.
pub const TASK_COUNT: u32 = 4;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    Preprocessing,
    Regression,
    BinaryClassification,
    MulticlassClassification,
}

impl TaskKind {
    /// Supervised tasks run the train/evaluate entry points; the
    /// preprocessing task runs a single transform entry point.
    pub fn is_supervised(&self) -> bool {
        !matches!(self, TaskKind::Preprocessing)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: u32,
    pub name: &'static str,
    pub description: &'static str,
    /// Required entry-point signature(s) the artifact must expose.
    pub signature: &'static str,
    /// Display name of the metric backing the leaderboard.
    pub metric: &'static str,
    pub kind: TaskKind,
}

static TASKS: [Task; 4] = [
    Task {
        id: 0,
        name: "Data Preprocessing (EDA)",
        description: "Clean and preprocess the training dataset. Remove nulls, \
                      normalize numeric features, encode categorical features.",
        signature: "preprocess_data(rows) -> rows",
        metric: "Automated checks (0-30 points)",
        kind: TaskKind::Preprocessing,
    },
    Task {
        id: 1,
        name: "Regression",
        description: "Build a model to predict continuous values (house prices, \
                      temperature, etc.).",
        signature: "train_model(x_train, y_train) + evaluate_model(model, x_test, y_test)",
        metric: "R\u{b2} Score (0-1)",
        kind: TaskKind::Regression,
    },
    Task {
        id: 2,
        name: "Binary Classification",
        description: "Build a model to classify binary labels (yes/no, spam/not \
                      spam, etc.).",
        signature: "train_model(x_train, y_train) + evaluate_model(model, x_test, y_test)",
        metric: "Accuracy (0-1)",
        kind: TaskKind::BinaryClassification,
    },
    Task {
        id: 3,
        name: "Multi-class Classification",
        description: "Build a model to classify multiple class labels (iris \
                      species, digit recognition, etc.).",
        signature: "train_model(x_train, y_train) + evaluate_model(model, x_test, y_test)",
        metric: "F1 Macro (0-1)",
        kind: TaskKind::MulticlassClassification,
    },
];

/// Static catalog of the four competition tasks.
pub struct TaskRegistry;

impl TaskRegistry {
    /// Look up a task by id. Ids outside the catalog fail with
    /// `TaskNotFound`, which is distinct from a missing data file.
    pub fn describe(task_id: u32) -> Result<&'static Task> {
        TASKS
            .iter()
            .find(|t| t.id == task_id)
            .ok_or(CoreError::TaskNotFound(task_id))
    }

    pub fn all() -> &'static [Task] {
        &TASKS
    }
}
