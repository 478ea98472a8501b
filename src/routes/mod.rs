pub mod assignments;
pub mod auth;
pub mod dashboard;
pub mod fees;
pub mod frontend;
pub mod results;
pub mod salaries;
pub mod staff;
pub mod students;
pub mod users;

pub use assignments::configure_assignment_routes;
pub use auth::configure_auth_routes;
pub use dashboard::configure_dashboard_routes;
pub use fees::configure_fee_routes;
pub use frontend::configure_frontend_routes;
pub use results::configure_result_routes;
pub use salaries::configure_salary_routes;
pub use staff::configure_staff_routes;
pub use students::configure_student_routes;
pub use users::configure_user_routes;
