use grandprix_core::{
    EvaluationResult, Repository, Submission, User,
};
use grandprix_storage::{
    sqlite::run_migrations, SubmissionRepository, TeamRepository, UserRepository,
};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

async fn test_pool() -> SqlitePool {
    // A single connection keeps the in-memory database alive for the whole
    // test.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}

async fn seed_user(pool: &SqlitePool, username: &str, team: &str) -> User {
    let team = TeamRepository::new(pool.clone())
        .get_or_create(team)
        .await
        .unwrap();
    let user = User::new(username.to_string(), None, "hash".to_string(), team.id);
    UserRepository::new(pool.clone()).create(&user).await.unwrap()
}

#[tokio::test]
async fn team_get_or_create_is_idempotent() {
    let pool = test_pool().await;
    let repo = TeamRepository::new(pool.clone());

    let first = repo.get_or_create("Scuderia").await.unwrap();
    let second = repo.get_or_create("Scuderia").await.unwrap();
    assert_eq!(first.id, second.id);

    let found = repo.find_by_id(&first.id).await.unwrap().unwrap();
    assert_eq!(found.name, "Scuderia");
}

#[tokio::test]
async fn user_round_trip() {
    let pool = test_pool().await;
    let user = seed_user(&pool, "alice", "Scuderia").await;

    let repo = UserRepository::new(pool.clone());
    let by_name = repo.find_by_username("alice").await.unwrap().unwrap();
    assert_eq!(by_name.id, user.id);
    assert_eq!(by_name.team_id, user.team_id);

    assert!(repo.find_by_username("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn submission_save_find_delete() {
    let pool = test_pool().await;
    let user = seed_user(&pool, "alice", "Scuderia").await;
    let repo = SubmissionRepository::new(pool.clone());

    let result = EvaluationResult::success(1, 0.9123, serde_json::json!({"metric_name": "R² Score"}));
    let submission =
        Submission::new(user.id, user.team_id, 1, "task1_abc.py".to_string()).with_result(&result);

    repo.save(&submission).await.unwrap();

    let found = repo.find_by_id(&submission.id).await.unwrap().unwrap();
    assert_eq!(found.score, 0.9123);
    assert_eq!(found.details.unwrap()["metric_name"], "R² Score");

    repo.delete(&submission.id).await.unwrap();
    assert!(repo.find_by_id(&submission.id).await.unwrap().is_none());
}

#[tokio::test]
async fn quota_counts_per_team_and_task() {
    let pool = test_pool().await;
    let user = seed_user(&pool, "alice", "Scuderia").await;
    let repo = SubmissionRepository::new(pool.clone());

    for _ in 0..2 {
        let s = Submission::new(user.id, user.team_id, 2, "task2_x.py".to_string());
        repo.save(&s).await.unwrap();
    }
    let s = Submission::new(user.id, user.team_id, 3, "task3_x.py".to_string());
    repo.save(&s).await.unwrap();

    assert_eq!(repo.count_for_team_task(&user.team_id, 2).await.unwrap(), 2);
    assert_eq!(repo.count_for_team_task(&user.team_id, 3).await.unwrap(), 1);
    assert_eq!(repo.count_for_team_task(&user.team_id, 0).await.unwrap(), 0);
}

#[tokio::test]
async fn leaderboard_ranks_best_successful_score_per_team() {
    let pool = test_pool().await;
    let alice = seed_user(&pool, "alice", "Scuderia").await;
    let bob = seed_user(&pool, "bob", "Haasje").await;
    let repo = SubmissionRepository::new(pool.clone());

    for (user, score) in [(&alice, 0.5), (&alice, 0.8), (&bob, 0.9)] {
        let result = EvaluationResult::success(1, score, serde_json::json!({}));
        let s = Submission::new(user.id, user.team_id, 1, "task1_x.py".to_string())
            .with_result(&result);
        repo.save(&s).await.unwrap();
    }
    // Errored submissions never rank.
    let failed = Submission::new(alice.id, alice.team_id, 1, "task1_y.py".to_string())
        .with_result(&EvaluationResult::failure(1, "boom"));
    repo.save(&failed).await.unwrap();

    let board = repo.leaderboard(1).await.unwrap();
    assert_eq!(board.len(), 2);
    assert_eq!(board[0].team_name, "Haasje");
    assert_eq!(board[0].best_score, 0.9);
    assert_eq!(board[1].team_name, "Scuderia");
    assert_eq!(board[1].best_score, 0.8);
    assert_eq!(board[1].submissions, 2);

    // Other tasks stay empty.
    assert!(repo.leaderboard(3).await.unwrap().is_empty());
}

#[tokio::test]
async fn list_for_user_returns_own_submissions_only() {
    let pool = test_pool().await;
    let alice = seed_user(&pool, "alice", "Scuderia").await;
    let bob = seed_user(&pool, "bob", "Haasje").await;
    let repo = SubmissionRepository::new(pool.clone());

    let s = Submission::new(alice.id, alice.team_id, 0, "task0_x.py".to_string());
    repo.save(&s).await.unwrap();

    assert_eq!(repo.list_for_user(&alice.id).await.unwrap().len(), 1);
    assert!(repo.list_for_user(&bob.id).await.unwrap().is_empty());
}
