use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Extension, Json,
};
use grandprix_core::{Repository, Submission, TaskRegistry};
use grandprix_storage::SubmissionRepository;

use crate::{
    dto::SubmissionResponse,
    error::{ApiError, ApiResult},
    middleware::AuthUser,
    AppState,
};

/// Upload a submission artifact and evaluate it synchronously. The quota
/// check runs before anything touches the sandbox; the evaluation outcome
/// (success or error) is persisted either way and is final.
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    multipart: Multipart,
) -> ApiResult<(StatusCode, Json<SubmissionResponse>)> {
    let upload = read_upload(multipart).await?;
    let task = TaskRegistry::describe(upload.task_id)?;

    let repo = SubmissionRepository::new(state.pool.clone());
    let used = repo.count_for_team_task(&auth.team_id, task.id).await?;
    if used >= state.submission_limit {
        return Err(ApiError::BadRequest(format!(
            "Submission limit reached for task {} ({} of {})",
            task.id, used, state.submission_limit
        )));
    }

    let (submission_id, artifact_path) = state.artifacts.save(task.id, &upload.contents)?;

    let result = state.evaluator.evaluate(task.id, &artifact_path).await?;

    let submission = Submission {
        id: submission_id,
        ..Submission::new(auth.user_id, auth.team_id, task.id, upload.filename)
    }
    .with_result(&result);
    let submission = repo.save(&submission).await?;

    tracing::info!(
        submission = %submission.id,
        task_id = task.id,
        user = %auth.username,
        score = submission.score,
        status = submission.status.as_str(),
        "Submission evaluated"
    );

    Ok((
        StatusCode::CREATED,
        Json(SubmissionResponse::from(&submission)),
    ))
}

pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<Json<Vec<SubmissionResponse>>> {
    let submissions = SubmissionRepository::new(state.pool.clone())
        .list_for_user(&auth.user_id)
        .await?;
    Ok(Json(
        submissions.iter().map(SubmissionResponse::from).collect(),
    ))
}

struct Upload {
    task_id: u32,
    filename: String,
    contents: Vec<u8>,
}

async fn read_upload(mut multipart: Multipart) -> ApiResult<Upload> {
    let mut task_id = None;
    let mut file = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        match field.name() {
            Some("task_id") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(e.to_string()))?;
                let id = text
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| ApiError::BadRequest(format!("Invalid task_id: {}", text)))?;
                task_id = Some(id);
            }
            Some("file") => {
                let filename = field
                    .file_name()
                    .unwrap_or("submission.py")
                    .to_string();
                let contents = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(e.to_string()))?;
                file = Some((filename, contents.to_vec()));
            }
            _ => {}
        }
    }

    let task_id =
        task_id.ok_or_else(|| ApiError::BadRequest("Missing 'task_id' field".to_string()))?;
    let (filename, contents) =
        file.ok_or_else(|| ApiError::BadRequest("Missing 'file' field".to_string()))?;

    if contents.is_empty() {
        return Err(ApiError::BadRequest("Uploaded file is empty".to_string()));
    }

    Ok(Upload {
        task_id,
        filename,
        contents,
    })
}
