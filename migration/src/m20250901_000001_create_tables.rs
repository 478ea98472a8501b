use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建操作员账号表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::Status).string().not_null())
                    .col(ColumnDef::new(Users::DisplayName).string().null())
                    .col(ColumnDef::new(Users::LastLogin).big_integer().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建学生表
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Students::AdmissionNo)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Students::FirstName).string().not_null())
                    .col(ColumnDef::new(Students::LastName).string().not_null())
                    .col(ColumnDef::new(Students::Gender).string().not_null())
                    .col(ColumnDef::new(Students::DateOfBirth).big_integer().null())
                    .col(ColumnDef::new(Students::ClassName).string().not_null())
                    .col(ColumnDef::new(Students::Section).string().null())
                    .col(ColumnDef::new(Students::GuardianName).string().not_null())
                    .col(ColumnDef::new(Students::GuardianPhone).string().not_null())
                    .col(ColumnDef::new(Students::Email).string().null())
                    .col(ColumnDef::new(Students::Address).text().null())
                    .col(ColumnDef::new(Students::Status).string().not_null())
                    .col(ColumnDef::new(Students::EnrolledOn).big_integer().not_null())
                    .col(ColumnDef::new(Students::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Students::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建教职工表
        manager
            .create_table(
                Table::create()
                    .table(Staff::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Staff::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Staff::StaffNo)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Staff::FirstName).string().not_null())
                    .col(ColumnDef::new(Staff::LastName).string().not_null())
                    .col(
                        ColumnDef::new(Staff::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Staff::Phone).string().not_null())
                    .col(ColumnDef::new(Staff::Position).string().not_null())
                    .col(ColumnDef::new(Staff::Department).string().not_null())
                    .col(ColumnDef::new(Staff::Subjects).text().not_null())
                    .col(ColumnDef::new(Staff::Classes).text().not_null())
                    .col(ColumnDef::new(Staff::Qualification).string().null())
                    .col(ColumnDef::new(Staff::EmploymentType).string().not_null())
                    .col(ColumnDef::new(Staff::BaseSalary).double().not_null())
                    .col(ColumnDef::new(Staff::Status).string().not_null())
                    .col(ColumnDef::new(Staff::HiredOn).big_integer().not_null())
                    .col(ColumnDef::new(Staff::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Staff::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建收费记录表
        manager
            .create_table(
                Table::create()
                    .table(FeeRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FeeRecords::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FeeRecords::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FeeRecords::Session).string().not_null())
                    .col(ColumnDef::new(FeeRecords::Term).string().not_null())
                    .col(ColumnDef::new(FeeRecords::FeeType).string().not_null())
                    .col(ColumnDef::new(FeeRecords::Description).text().null())
                    .col(ColumnDef::new(FeeRecords::AmountDue).double().not_null())
                    .col(ColumnDef::new(FeeRecords::Discount).double().not_null())
                    .col(ColumnDef::new(FeeRecords::AmountPaid).double().not_null())
                    .col(ColumnDef::new(FeeRecords::Balance).double().not_null())
                    .col(ColumnDef::new(FeeRecords::DueDate).big_integer().null())
                    .col(
                        ColumnDef::new(FeeRecords::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeeRecords::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(FeeRecords::Table, FeeRecords::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建缴费流水表
        manager
            .create_table(
                Table::create()
                    .table(FeePayments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FeePayments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FeePayments::FeeRecordId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FeePayments::Amount).double().not_null())
                    .col(ColumnDef::new(FeePayments::Method).string().not_null())
                    .col(ColumnDef::new(FeePayments::Reference).string().null())
                    .col(
                        ColumnDef::new(FeePayments::ReceiptNo)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(FeePayments::PaidOn).big_integer().not_null())
                    .col(
                        ColumnDef::new(FeePayments::RecordedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeePayments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(FeePayments::Table, FeePayments::FeeRecordId)
                            .to(FeeRecords::Table, FeeRecords::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建工资表
        manager
            .create_table(
                Table::create()
                    .table(Salaries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Salaries::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Salaries::StaffId).big_integer().not_null())
                    .col(ColumnDef::new(Salaries::Period).string().not_null())
                    .col(ColumnDef::new(Salaries::BasicSalary).double().not_null())
                    .col(ColumnDef::new(Salaries::Allowances).double().not_null())
                    .col(ColumnDef::new(Salaries::Deductions).double().not_null())
                    .col(ColumnDef::new(Salaries::Tax).double().not_null())
                    .col(ColumnDef::new(Salaries::GrossPay).double().not_null())
                    .col(ColumnDef::new(Salaries::NetPay).double().not_null())
                    .col(ColumnDef::new(Salaries::Status).string().not_null())
                    .col(ColumnDef::new(Salaries::PaidOn).big_integer().null())
                    .col(ColumnDef::new(Salaries::PaymentMethod).string().null())
                    .col(ColumnDef::new(Salaries::Notes).text().null())
                    .col(ColumnDef::new(Salaries::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Salaries::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Salaries::Table, Salaries::StaffId)
                            .to(Staff::Table, Staff::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建学期成绩表
        manager
            .create_table(
                Table::create()
                    .table(TermResults::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TermResults::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TermResults::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TermResults::Subject).string().not_null())
                    .col(ColumnDef::new(TermResults::Session).string().not_null())
                    .col(ColumnDef::new(TermResults::Term).string().not_null())
                    .col(ColumnDef::new(TermResults::CaScore).double().not_null())
                    .col(ColumnDef::new(TermResults::ExamScore).double().not_null())
                    .col(ColumnDef::new(TermResults::Total).double().not_null())
                    .col(ColumnDef::new(TermResults::Grade).string().not_null())
                    .col(ColumnDef::new(TermResults::Remark).string().not_null())
                    .col(
                        ColumnDef::new(TermResults::RecordedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TermResults::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TermResults::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TermResults::Table, TermResults::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建作业布置表
        manager
            .create_table(
                Table::create()
                    .table(Assignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assignments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Assignments::Title).string().not_null())
                    .col(ColumnDef::new(Assignments::Description).text().null())
                    .col(ColumnDef::new(Assignments::Subject).string().not_null())
                    .col(ColumnDef::new(Assignments::ClassName).string().not_null())
                    .col(ColumnDef::new(Assignments::StaffId).big_integer().null())
                    .col(ColumnDef::new(Assignments::DueDate).big_integer().not_null())
                    .col(ColumnDef::new(Assignments::MaxScore).double().not_null())
                    .col(ColumnDef::new(Assignments::Status).string().not_null())
                    .col(
                        ColumnDef::new(Assignments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Assignments::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assignments::Table, Assignments::StaffId)
                            .to(Staff::Table, Staff::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 索引 ====================
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_students_class_name")
                    .table(Students::Table)
                    .col(Students::ClassName)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_students_status")
                    .table(Students::Table)
                    .col(Students::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_staff_department")
                    .table(Staff::Table)
                    .col(Staff::Department)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_fee_records_student_id")
                    .table(FeeRecords::Table)
                    .col(FeeRecords::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_fee_records_session_term")
                    .table(FeeRecords::Table)
                    .col(FeeRecords::Session)
                    .col(FeeRecords::Term)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_fee_payments_fee_record_id")
                    .table(FeePayments::Table)
                    .col(FeePayments::FeeRecordId)
                    .to_owned(),
            )
            .await?;

        // 同一员工同一月份只能有一条工资记录
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_salaries_staff_period")
                    .table(Salaries::Table)
                    .col(Salaries::StaffId)
                    .col(Salaries::Period)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 同一学生同一学期同一科目只能有一条成绩
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_term_results_unique_entry")
                    .table(TermResults::Table)
                    .col(TermResults::StudentId)
                    .col(TermResults::Subject)
                    .col(TermResults::Session)
                    .col(TermResults::Term)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_assignments_class_name")
                    .table(Assignments::Table)
                    .col(Assignments::ClassName)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Assignments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TermResults::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Salaries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FeePayments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FeeRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Staff::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    Role,
    Status,
    DisplayName,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Students {
    #[sea_orm(iden = "students")]
    Table,
    Id,
    AdmissionNo,
    FirstName,
    LastName,
    Gender,
    DateOfBirth,
    ClassName,
    Section,
    GuardianName,
    GuardianPhone,
    Email,
    Address,
    Status,
    EnrolledOn,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Staff {
    #[sea_orm(iden = "staff")]
    Table,
    Id,
    StaffNo,
    FirstName,
    LastName,
    Email,
    Phone,
    Position,
    Department,
    Subjects,
    Classes,
    Qualification,
    EmploymentType,
    BaseSalary,
    Status,
    HiredOn,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum FeeRecords {
    #[sea_orm(iden = "fee_records")]
    Table,
    Id,
    StudentId,
    Session,
    Term,
    FeeType,
    Description,
    AmountDue,
    Discount,
    AmountPaid,
    Balance,
    DueDate,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum FeePayments {
    #[sea_orm(iden = "fee_payments")]
    Table,
    Id,
    FeeRecordId,
    Amount,
    Method,
    Reference,
    ReceiptNo,
    PaidOn,
    RecordedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Salaries {
    #[sea_orm(iden = "salaries")]
    Table,
    Id,
    StaffId,
    Period,
    BasicSalary,
    Allowances,
    Deductions,
    Tax,
    GrossPay,
    NetPay,
    Status,
    PaidOn,
    PaymentMethod,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TermResults {
    #[sea_orm(iden = "term_results")]
    Table,
    Id,
    StudentId,
    Subject,
    Session,
    Term,
    CaScore,
    ExamScore,
    Total,
    Grade,
    Remark,
    RecordedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Assignments {
    #[sea_orm(iden = "assignments")]
    Table,
    Id,
    Title,
    Description,
    Subject,
    ClassName,
    StaffId,
    DueDate,
    MaxScore,
    Status,
    CreatedAt,
    UpdatedAt,
}
