//! SeaOrmStorage 集成测试（内存 SQLite；并发用例使用临时文件库）

use chrono::NaiveDate;
use futures_util::future::join_all;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};
use std::path::Path;
use std::time::Duration;

use rust_school_admin::errors::SchoolAdminError;

use rust_school_admin::models::SortOrder;
use rust_school_admin::models::common::Term;
use rust_school_admin::models::fees::entities::{FeeStatus, FeeType, PaymentMethod, PaymentOutcome};
use rust_school_admin::models::fees::requests::{
    BulkCreateFeesRequest, CreateFeeRequest, RecordPaymentRequest,
};
use rust_school_admin::models::results::entities::TermResult;
use rust_school_admin::models::results::requests::{ResultEntry, ResultFilter, ResultSortField};
use rust_school_admin::models::salaries::entities::SalaryStatus;
use rust_school_admin::models::salaries::requests::{
    CreateSalaryRequest, SalaryFilter, SalarySortField, UpdateSalaryRequest,
};
use rust_school_admin::models::staff::entities::{EmploymentType, StaffPosition, StaffStatus};
use rust_school_admin::models::staff::requests::CreateStaffRequest;
use rust_school_admin::models::students::entities::{Gender, StudentStatus};
use rust_school_admin::models::students::requests::{
    CreateStudentRequest, StudentFilter, StudentListQuery, StudentSortField,
};
use rust_school_admin::storage::Storage;
use rust_school_admin::storage::sea_orm_storage::SeaOrmStorage;

async fn setup() -> SeaOrmStorage {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    // 内存库每个连接相互独立
    opt.max_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    SeaOrmStorage::from_connection(db)
}

/// 文件库 + 多连接池，写事务之间会真实竞争
async fn setup_file_backed(path: &Path, connections: u32) -> SeaOrmStorage {
    use sea_orm::SqlxSqliteConnector;
    use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

    let opt = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));
    let pool = SqlitePoolOptions::new()
        .max_connections(connections)
        .connect_with(opt)
        .await
        .unwrap();
    let db = SqlxSqliteConnector::from_sqlx_sqlite_pool(pool);
    Migrator::up(&db, None).await.unwrap();
    SeaOrmStorage::from_connection(db)
}

fn student(admission_no: &str, first_name: &str, class_name: &str) -> CreateStudentRequest {
    CreateStudentRequest {
        admission_no: admission_no.to_string(),
        first_name: first_name.to_string(),
        last_name: "Okafor".to_string(),
        gender: Gender::Female,
        date_of_birth: NaiveDate::from_ymd_opt(2012, 3, 14),
        class_name: class_name.to_string(),
        section: None,
        guardian_name: "Mrs Okafor".to_string(),
        guardian_phone: "+2348012345678".to_string(),
        email: None,
        address: None,
        status: None,
        enrolled_on: None,
    }
}

fn staff(staff_no: &str, email: &str, base_salary: f64) -> CreateStaffRequest {
    CreateStaffRequest {
        staff_no: staff_no.to_string(),
        first_name: "Tunde".to_string(),
        last_name: "Bello".to_string(),
        email: email.to_string(),
        phone: "+2348098765432".to_string(),
        position: StaffPosition::Teacher,
        department: "Sciences".to_string(),
        subjects: vec!["Mathematics".to_string()],
        classes: vec!["JSS1".to_string()],
        qualification: None,
        employment_type: EmploymentType::FullTime,
        base_salary,
        status: None,
        hired_on: None,
    }
}

fn tuition(student_id: i64, amount_due: f64) -> CreateFeeRequest {
    CreateFeeRequest {
        student_id,
        session: "2024/2025".to_string(),
        term: Term::First,
        fee_type: FeeType::Tuition,
        description: None,
        amount_due,
        discount: 0.0,
        due_date: None,
    }
}

fn cash(amount: f64) -> RecordPaymentRequest {
    RecordPaymentRequest {
        amount,
        method: PaymentMethod::Cash,
        reference: None,
        paid_on: None,
    }
}

fn salary_for(staff_id: i64, period: &str, basic_salary: f64) -> CreateSalaryRequest {
    CreateSalaryRequest {
        staff_id,
        period: period.to_string(),
        basic_salary: Some(basic_salary),
        allowances: 0.0,
        deductions: 0.0,
        tax: 0.0,
        notes: None,
    }
}

fn student_query(filter: StudentFilter, page: i64, size: i64) -> StudentListQuery {
    StudentListQuery {
        page: Some(page),
        size: Some(size),
        filter,
        sort_by: StudentSortField::default(),
        sort_order: SortOrder::Asc,
    }
}

#[tokio::test]
async fn student_filters_narrow_the_set() {
    let storage = setup().await;
    storage.create_student(student("ADM-001", "Ada", "JSS1")).await.unwrap();
    storage.create_student(student("ADM-002", "Bola", "JSS1")).await.unwrap();
    storage.create_student(student("ADM-003", "Chidi", "JSS2")).await.unwrap();
    let mut graduated = student("ADM-004", "Dayo", "JSS2");
    graduated.status = Some(StudentStatus::Graduated);
    storage.create_student(graduated).await.unwrap();

    let all = storage
        .list_students_with_pagination(student_query(StudentFilter::default(), 1, 50))
        .await
        .unwrap();
    assert_eq!(all.pagination.total, 4);

    let jss1 = storage
        .list_students_with_pagination(student_query(
            StudentFilter {
                class_name: Some("JSS1".to_string()),
                ..Default::default()
            },
            1,
            50,
        ))
        .await
        .unwrap();
    assert_eq!(jss1.pagination.total, 2);
    assert!(jss1.items.iter().all(|s| s.class_name == "JSS1"));

    let active_jss2 = storage
        .list_students_with_pagination(student_query(
            StudentFilter {
                class_name: Some("JSS2".to_string()),
                status: Some(StudentStatus::Active),
                ..Default::default()
            },
            1,
            50,
        ))
        .await
        .unwrap();
    assert_eq!(active_jss2.pagination.total, 1);
    assert_eq!(active_jss2.items[0].admission_no, "ADM-003");

    let search = storage
        .list_students_with_pagination(student_query(
            StudentFilter {
                search: Some("bola".to_string()),
                ..Default::default()
            },
            1,
            50,
        ))
        .await
        .unwrap();
    assert_eq!(search.items.len(), 1);
    assert_eq!(search.items[0].first_name, "Bola");
}

#[tokio::test]
async fn pagination_stays_in_bounds() {
    let storage = setup().await;
    for i in 1..=7 {
        storage
            .create_student(student(&format!("ADM-{i:03}"), "Student", "JSS1"))
            .await
            .unwrap();
    }

    let page = storage
        .list_students_with_pagination(student_query(StudentFilter::default(), 2, 3))
        .await
        .unwrap();
    assert_eq!(page.items.len(), 3);
    assert_eq!(page.pagination.total_pages, 3);

    // 超出页数时返回最后一页
    let beyond = storage
        .list_students_with_pagination(student_query(StudentFilter::default(), 99, 3))
        .await
        .unwrap();
    assert_eq!(beyond.pagination.page, 3);
    assert_eq!(beyond.items.len(), 1);

    let empty = storage
        .list_students_with_pagination(student_query(
            StudentFilter {
                class_name: Some("SS3".to_string()),
                ..Default::default()
            },
            5,
            3,
        ))
        .await
        .unwrap();
    assert!(empty.items.is_empty());
    assert_eq!(empty.pagination.page, 1);
    assert_eq!(empty.pagination.total_pages, 0);
}

#[tokio::test]
async fn payment_over_balance_is_rejected_and_balance_updates() {
    let storage = setup().await;
    let s = storage.create_student(student("ADM-100", "Ada", "JSS1")).await.unwrap();
    let fee = storage
        .create_fee(CreateFeeRequest {
            student_id: s.id,
            session: "2024/2025".to_string(),
            term: Term::First,
            fee_type: FeeType::Tuition,
            description: None,
            amount_due: 1000.0,
            discount: 100.0,
            due_date: None,
        })
        .await
        .unwrap();
    assert_eq!(fee.balance, 900.0);
    assert_eq!(fee.status, FeeStatus::Unpaid);

    let payment = |amount: f64| RecordPaymentRequest {
        amount,
        method: PaymentMethod::Cash,
        reference: None,
        paid_on: None,
    };

    match storage.record_payment(fee.id, payment(400.0), 1).await.unwrap() {
        PaymentOutcome::Recorded { fee, .. } => {
            assert_eq!(fee.amount_paid, 400.0);
            assert_eq!(fee.balance, 500.0);
            assert_eq!(fee.status, FeeStatus::Partial);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }

    match storage.record_payment(fee.id, payment(600.0), 1).await.unwrap() {
        PaymentOutcome::ExceedsBalance { balance } => assert_eq!(balance, 500.0),
        other => panic!("unexpected outcome: {other:?}"),
    }

    // 被拒绝的缴费不影响余额
    let unchanged = storage.get_fee_by_id(fee.id).await.unwrap().unwrap();
    assert_eq!(unchanged.balance, 500.0);
    assert_eq!(storage.list_fee_payments(fee.id).await.unwrap().len(), 1);

    match storage.record_payment(fee.id, payment(500.0), 1).await.unwrap() {
        PaymentOutcome::Recorded { fee, .. } => {
            assert_eq!(fee.balance, 0.0);
            assert_eq!(fee.status, FeeStatus::Paid);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }

    assert!(matches!(
        storage.record_payment(9999, payment(10.0), 1).await.unwrap(),
        PaymentOutcome::FeeNotFound
    ));
}

#[tokio::test]
async fn payroll_generation_skips_existing() {
    let storage = setup().await;
    let a = storage.create_staff(staff("STF-001", "a@school.test", 120000.0)).await.unwrap();
    storage.create_staff(staff("STF-002", "b@school.test", 90000.0)).await.unwrap();
    let mut on_leave = staff("STF-003", "c@school.test", 80000.0);
    on_leave.status = Some(StaffStatus::OnLeave);
    storage.create_staff(on_leave).await.unwrap();

    storage
        .create_salary(CreateSalaryRequest {
            staff_id: a.id,
            period: "2025-01".to_string(),
            basic_salary: Some(120000.0),
            allowances: 10000.0,
            deductions: 0.0,
            tax: 5000.0,
            notes: None,
        })
        .await
        .unwrap();

    let first = storage.generate_payroll("2025-01").await.unwrap();
    assert_eq!(first.created, 1);
    assert_eq!(first.skipped, 1);

    let second = storage.generate_payroll("2025-01").await.unwrap();
    assert_eq!(second.created, 0);
    assert_eq!(second.skipped, 2);

    let salaries = storage
        .list_salaries_filtered(
            &SalaryFilter {
                period: Some("2025-01".to_string()),
                ..Default::default()
            },
            SalarySortField::default(),
            SortOrder::Asc,
            None,
        )
        .await
        .unwrap();
    assert_eq!(salaries.len(), 2);
    // 手工录入的记录未被覆盖
    let manual = salaries.iter().find(|s| s.staff_id == a.id).unwrap();
    assert_eq!(manual.net_pay, 125000.0);
}

async fn maths_results(storage: &SeaOrmStorage) -> Vec<TermResult> {
    let filter = ResultFilter {
        subject: Some("Mathematics".to_string()),
        ..Default::default()
    };
    storage
        .list_term_results_filtered(&filter, ResultSortField::default(), SortOrder::Asc, None)
        .await
        .unwrap()
}

#[tokio::test]
async fn result_sheet_upsert_is_idempotent() {
    let storage = setup().await;
    let a = storage.create_student(student("ADM-201", "Ada", "JSS1")).await.unwrap();
    let b = storage.create_student(student("ADM-202", "Bola", "JSS1")).await.unwrap();

    let entries = vec![
        ResultEntry {
            student_id: a.id,
            ca_score: 30.0,
            exam_score: 45.0,
        },
        ResultEntry {
            student_id: b.id,
            ca_score: 20.0,
            exam_score: 25.0,
        },
    ];

    storage
        .upsert_term_results("2024/2025", Term::First, "Mathematics", &entries, 1)
        .await
        .unwrap();
    let first = maths_results(&storage).await;

    storage
        .upsert_term_results("2024/2025", Term::First, "Mathematics", &entries, 1)
        .await
        .unwrap();
    let second = maths_results(&storage).await;

    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 2);
    assert_eq!(
        first.iter().map(|r| (r.id, r.total)).collect::<Vec<_>>(),
        second.iter().map(|r| (r.id, r.total)).collect::<Vec<_>>()
    );

    // 修改分数后更新原记录而非新增
    let corrected = vec![ResultEntry {
        student_id: b.id,
        ca_score: 25.0,
        exam_score: 30.0,
    }];
    storage
        .upsert_term_results("2024/2025", Term::First, "Mathematics", &corrected, 1)
        .await
        .unwrap();
    let third = maths_results(&storage).await;
    assert_eq!(third.len(), 2);
    let bola = third.iter().find(|r| r.student_id == b.id).unwrap();
    assert_eq!(bola.total, 55.0);
    assert_eq!(bola.grade, "C");

    let ada = third.iter().find(|r| r.student_id == a.id).unwrap();
    assert_eq!(ada.total, 75.0);
    assert_eq!(ada.grade, "A");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_payments_never_overdraw_a_fee() {
    let path = std::env::temp_dir().join(format!("school-admin-{}.db", uuid::Uuid::new_v4()));
    let storage = setup_file_backed(&path, 8).await;

    let s = storage.create_student(student("ADM-300", "Ada", "JSS1")).await.unwrap();
    let fee = storage.create_fee(tuition(s.id, 100.0)).await.unwrap();

    let attempts = (0..8).map(|_| storage.record_payment(fee.id, cash(60.0), 1));
    let outcomes: Vec<PaymentOutcome> = join_all(attempts)
        .await
        .into_iter()
        .map(|outcome| outcome.unwrap())
        .collect();

    let recorded = outcomes
        .iter()
        .filter(|o| matches!(o, PaymentOutcome::Recorded { .. }))
        .count();
    let rejected = outcomes
        .iter()
        .filter(|o| matches!(o, PaymentOutcome::ExceedsBalance { balance } if *balance == 40.0))
        .count();
    assert_eq!(recorded, 1);
    assert_eq!(rejected, 7);

    let fee = storage.get_fee_by_id(fee.id).await.unwrap().unwrap();
    assert_eq!(fee.amount_paid, 60.0);
    assert_eq!(fee.balance, 40.0);
    assert_eq!(storage.list_fee_payments(fee.id).await.unwrap().len(), 1);

    drop(storage);
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
    }
}

#[tokio::test]
async fn fee_with_payments_cannot_be_deleted() {
    let storage = setup().await;
    let s = storage.create_student(student("ADM-310", "Bola", "JSS1")).await.unwrap();
    let paid = storage.create_fee(tuition(s.id, 500.0)).await.unwrap();
    storage.record_payment(paid.id, cash(100.0), 1).await.unwrap();

    assert!(matches!(
        storage.delete_fee(paid.id).await,
        Err(SchoolAdminError::Conflict(_))
    ));
    assert!(storage.get_fee_by_id(paid.id).await.unwrap().is_some());

    let mut unpaid = tuition(s.id, 200.0);
    unpaid.fee_type = FeeType::Exam;
    let unpaid = storage.create_fee(unpaid).await.unwrap();
    assert!(storage.delete_fee(unpaid.id).await.unwrap());
    assert!(!storage.delete_fee(unpaid.id).await.unwrap());
}

#[tokio::test]
async fn bulk_fees_skip_students_already_billed() {
    let storage = setup().await;
    storage.create_student(student("ADM-320", "Ada", "JSS3")).await.unwrap();
    storage.create_student(student("ADM-321", "Bola", "JSS3")).await.unwrap();
    storage.create_student(student("ADM-322", "Chidi", "SS1")).await.unwrap();
    let mut withdrawn = student("ADM-323", "Dayo", "JSS3");
    withdrawn.status = Some(StudentStatus::Withdrawn);
    storage.create_student(withdrawn).await.unwrap();

    let bulk = || BulkCreateFeesRequest {
        class_name: "JSS3".to_string(),
        session: "2024/2025".to_string(),
        term: Term::Second,
        fee_type: FeeType::Tuition,
        description: None,
        amount_due: 45000.0,
        discount: 0.0,
        due_date: None,
    };

    let first = storage.bulk_create_fees(bulk()).await.unwrap();
    assert_eq!((first.created, first.skipped), (2, 0));

    let second = storage.bulk_create_fees(bulk()).await.unwrap();
    assert_eq!((second.created, second.skipped), (0, 2));
}

#[tokio::test]
async fn pay_salaries_reports_updated_and_skipped() {
    let storage = setup().await;
    let a = storage.create_staff(staff("STF-010", "a@school.test", 100000.0)).await.unwrap();
    let b = storage.create_staff(staff("STF-011", "b@school.test", 80000.0)).await.unwrap();
    let first_salary = storage.create_salary(salary_for(a.id, "2025-02", 100000.0)).await.unwrap();
    let second_salary = storage.create_salary(salary_for(b.id, "2025-02", 80000.0)).await.unwrap();

    // 重复 ID 只处理一次，不存在的 ID 报告跳过
    let first = storage
        .pay_salaries(
            &[first_salary.id, 999, first_salary.id],
            PaymentMethod::BankTransfer,
            None,
        )
        .await
        .unwrap();
    assert_eq!(first.updated, vec![first_salary.id]);
    assert_eq!(
        first.skipped.iter().map(|s| s.id).collect::<Vec<_>>(),
        vec![999]
    );

    let second = storage
        .pay_salaries(
            &[second_salary.id, first_salary.id],
            PaymentMethod::Cash,
            None,
        )
        .await
        .unwrap();
    assert_eq!(second.updated, vec![second_salary.id]);
    assert_eq!(
        second.skipped.iter().map(|s| s.id).collect::<Vec<_>>(),
        vec![first_salary.id]
    );

    // 再次发放不覆盖首次的支付方式
    let paid = storage.get_salary_by_id(first_salary.id).await.unwrap().unwrap();
    assert_eq!(paid.status, SalaryStatus::Paid);
    assert_eq!(paid.payment_method, Some(PaymentMethod::BankTransfer));
    assert!(paid.paid_on.is_some());
}

#[tokio::test]
async fn paid_salary_only_accepts_notes() {
    let storage = setup().await;
    let a = storage.create_staff(staff("STF-020", "a@school.test", 100000.0)).await.unwrap();
    let salary = storage.create_salary(salary_for(a.id, "2025-03", 100000.0)).await.unwrap();
    storage
        .pay_salaries(&[salary.id], PaymentMethod::Cash, None)
        .await
        .unwrap();

    let raise = UpdateSalaryRequest {
        allowances: Some(5000.0),
        ..Default::default()
    };
    assert!(matches!(
        storage.update_salary(salary.id, raise).await,
        Err(SchoolAdminError::Conflict(_))
    ));

    let hold = UpdateSalaryRequest {
        status: Some(SalaryStatus::OnHold),
        ..Default::default()
    };
    assert!(matches!(
        storage.update_salary(salary.id, hold).await,
        Err(SchoolAdminError::Conflict(_))
    ));

    let note = UpdateSalaryRequest {
        notes: Some("已通过银行转账".to_string()),
        ..Default::default()
    };
    let updated = storage.update_salary(salary.id, note).await.unwrap().unwrap();
    assert_eq!(updated.notes.as_deref(), Some("已通过银行转账"));
    assert_eq!(updated.net_pay, 100000.0);
    assert_eq!(updated.status, SalaryStatus::Paid);
}

#[tokio::test]
async fn salary_update_cannot_mark_paid() {
    let storage = setup().await;
    let a = storage.create_staff(staff("STF-030", "a@school.test", 90000.0)).await.unwrap();
    let salary = storage.create_salary(salary_for(a.id, "2025-04", 90000.0)).await.unwrap();

    let mark_paid = UpdateSalaryRequest {
        status: Some(SalaryStatus::Paid),
        ..Default::default()
    };
    assert!(matches!(
        storage.update_salary(salary.id, mark_paid).await,
        Err(SchoolAdminError::Validation(_))
    ));

    let unchanged = storage.get_salary_by_id(salary.id).await.unwrap().unwrap();
    assert_eq!(unchanged.status, SalaryStatus::Pending);
    assert_eq!(unchanged.paid_on, None);
    assert_eq!(unchanged.payment_method, None);

    let hold = UpdateSalaryRequest {
        status: Some(SalaryStatus::OnHold),
        tax: Some(9000.0),
        ..Default::default()
    };
    let held = storage.update_salary(salary.id, hold).await.unwrap().unwrap();
    assert_eq!(held.status, SalaryStatus::OnHold);
    assert_eq!(held.net_pay, 81000.0);
}

#[tokio::test]
async fn staff_with_salaries_cannot_be_deleted() {
    let storage = setup().await;
    let a = storage.create_staff(staff("STF-040", "a@school.test", 70000.0)).await.unwrap();
    let b = storage.create_staff(staff("STF-041", "b@school.test", 70000.0)).await.unwrap();
    storage.create_salary(salary_for(a.id, "2025-05", 70000.0)).await.unwrap();

    assert!(matches!(
        storage.delete_staff(a.id).await,
        Err(SchoolAdminError::Conflict(_))
    ));
    assert!(storage.get_staff_by_id(a.id).await.unwrap().is_some());

    assert!(storage.delete_staff(b.id).await.unwrap());
    assert!(!storage.delete_staff(b.id).await.unwrap());
}
