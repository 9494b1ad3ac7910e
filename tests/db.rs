//! Database-backed service tests. Need a disposable PostgreSQL:
//! `TEST_DATABASE_URL=postgres://localhost/jobly_test cargo test -- --ignored`

use jobly_api::error::AppError;
use jobly_api::model::{CompanyPatch, NewCompany, NewJob, NewUser, UserPatch};
use jobly_api::service::{CompanyService, JobService, UserService};
use jobly_api::sql::{CompanyFilter, JobFilter};
use jobly_api::{ensure_database_exists, ensure_tables, PasswordHasher};
use sqlx::PgPool;

async fn pool() -> PgPool {
    let url = std::env::var("TEST_DATABASE_URL").unwrap_or_else(|_| "postgres://localhost/jobly_test".into());
    ensure_database_exists(&url).await.unwrap();
    let pool = PgPool::connect(&url).await.unwrap();
    ensure_tables(&pool).await.unwrap();
    pool
}

fn company(handle: &str, name: &str, num_employees: i32) -> NewCompany {
    NewCompany {
        handle: handle.into(),
        name: name.into(),
        description: format!("Desc {}", handle),
        num_employees: Some(num_employees),
        logo_url: None,
    }
}

async fn clear_companies(pool: &PgPool, prefix: &str) {
    sqlx::query("DELETE FROM companies WHERE handle LIKE $1")
        .bind(format!("{}%", prefix))
        .execute(pool)
        .await
        .unwrap();
}

#[tokio::test]
#[ignore]
async fn company_search_is_case_insensitive_containment() {
    let pool = pool().await;
    clear_companies(&pool, "srch-").await;
    CompanyService::create(&pool, &company("srch-net", "Srch Networks Inc", 50)).await.unwrap();
    CompanyService::create(&pool, &company("srch-bank", "Srch BANKING", 500)).await.unwrap();

    let filter = CompanyFilter {
        name: Some("sRcH NET".into()),
        ..Default::default()
    };
    let found = CompanyService::find_all(&pool, &filter).await.unwrap();
    let handles: Vec<_> = found.iter().map(|c| c.handle.as_str()).collect();
    assert_eq!(handles, vec!["srch-net"]);

    let filter = CompanyFilter {
        name: Some("srch".into()),
        min_employees: Some(100),
        max_employees: Some(1000),
    };
    let found = CompanyService::find_all(&pool, &filter).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].handle, "srch-bank");

    let filter = CompanyFilter {
        name: Some("srch_".into()),
        ..Default::default()
    };
    assert!(CompanyService::find_all(&pool, &filter).await.unwrap().is_empty());

    clear_companies(&pool, "srch-").await;
}

#[tokio::test]
#[ignore]
async fn company_lifecycle() {
    let pool = pool().await;
    clear_companies(&pool, "life-").await;
    CompanyService::create(&pool, &company("life-c1", "Life C1", 1)).await.unwrap();

    let dup = CompanyService::create(&pool, &company("life-c1", "Life C1 again", 1)).await;
    assert!(matches!(dup, Err(AppError::InvalidRequest(ref m)) if m == "Duplicate company: life-c1"));

    let patch = CompanyPatch {
        num_employees: Some(42),
        ..Default::default()
    };
    let updated = CompanyService::update(&pool, "life-c1", patch).await.unwrap();
    assert_eq!(updated.num_employees, Some(42));
    assert_eq!(updated.name, "Life C1");

    let missing = CompanyService::update(&pool, "life-nope", CompanyPatch {
        name: Some("x".into()),
        ..Default::default()
    })
    .await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    CompanyService::remove(&pool, "life-c1").await.unwrap();
    assert!(matches!(CompanyService::get(&pool, "life-c1").await, Err(AppError::NotFound(_))));
}

#[tokio::test]
#[ignore]
async fn job_filters_and_company_detail() {
    let pool = pool().await;
    clear_companies(&pool, "jobs-").await;
    CompanyService::create(&pool, &company("jobs-c1", "Jobs C1", 10)).await.unwrap();
    let with_equity = JobService::create(&pool, &NewJob {
        title: "Jobs Engineer".into(),
        salary: Some(120_000),
        equity: Some("0.05".into()),
        company_handle: "jobs-c1".into(),
    })
    .await
    .unwrap();
    JobService::create(&pool, &NewJob {
        title: "Jobs Clerk".into(),
        salary: Some(40_000),
        equity: Some("0".into()),
        company_handle: "jobs-c1".into(),
    })
    .await
    .unwrap();
    assert_eq!(with_equity.equity.as_deref(), Some("0.05"));

    let filter = JobFilter {
        title: Some("jobs ".into()),
        has_equity: Some(true),
        ..Default::default()
    };
    let found = JobService::find_all(&pool, &filter).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, with_equity.id);
    assert_eq!(found[0].company_name.as_deref(), Some("Jobs C1"));

    let filter = JobFilter {
        title: Some("jobs ".into()),
        min_salary: Some(50_000),
        has_equity: Some(false),
    };
    assert_eq!(JobService::find_all(&pool, &filter).await.unwrap().len(), 1);

    let detail = CompanyService::get(&pool, "jobs-c1").await.unwrap();
    assert_eq!(detail.jobs.len(), 2);

    let orphan = JobService::create(&pool, &NewJob {
        title: "Orphan".into(),
        salary: None,
        equity: None,
        company_handle: "jobs-missing".into(),
    })
    .await;
    assert!(matches!(orphan, Err(AppError::InvalidRequest(_))));

    clear_companies(&pool, "jobs-").await;
}

#[tokio::test]
#[ignore]
async fn user_register_login_update_apply() {
    let pool = pool().await;
    let hasher = PasswordHasher::new(4);
    sqlx::query("DELETE FROM users WHERE username = 'flow-u1'").execute(&pool).await.unwrap();
    clear_companies(&pool, "flow-").await;

    let new = NewUser {
        username: "flow-u1".into(),
        password: "password1".into(),
        first_name: "U1F".into(),
        last_name: "U1L".into(),
        email: "u1@email.com".into(),
        is_admin: false,
    };
    let user = UserService::register(&pool, &hasher, new.clone()).await.unwrap();
    assert!(!user.is_admin);
    assert!(matches!(
        UserService::register(&pool, &hasher, new).await,
        Err(AppError::InvalidRequest(_))
    ));

    assert_eq!(UserService::authenticate(&pool, &hasher, "flow-u1", "password1").await.unwrap(), user);
    assert!(matches!(
        UserService::authenticate(&pool, &hasher, "flow-u1", "wrong").await,
        Err(AppError::Unauthorized)
    ));

    let patch = UserPatch {
        password: Some("password2".into()),
        ..Default::default()
    };
    UserService::update(&pool, &hasher, "flow-u1", patch).await.unwrap();
    assert!(UserService::authenticate(&pool, &hasher, "flow-u1", "password2").await.is_ok());

    CompanyService::create(&pool, &company("flow-c1", "Flow C1", 3)).await.unwrap();
    let job = JobService::create(&pool, &NewJob {
        title: "Flow Job".into(),
        salary: None,
        equity: None,
        company_handle: "flow-c1".into(),
    })
    .await
    .unwrap();
    UserService::apply_to_job(&pool, "flow-u1", job.id).await.unwrap();
    UserService::apply_to_job(&pool, "flow-u1", job.id).await.unwrap();
    assert_eq!(UserService::get(&pool, "flow-u1").await.unwrap().jobs, vec![job.id]);
    assert!(matches!(
        UserService::apply_to_job(&pool, "flow-u1", -1).await,
        Err(AppError::NotFound(_))
    ));

    UserService::remove(&pool, "flow-u1").await.unwrap();
    clear_companies(&pool, "flow-").await;
}
