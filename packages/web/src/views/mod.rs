mod layout;
pub use layout::{AppLayout, PublicLayout};

mod login;
pub use login::Login;

mod register;
pub use register::Register;

mod reset;
pub use reset::Reset;

mod home;
pub use home::Home;

mod manage;
pub use manage::ManageCustomer;

mod customer_editor;
pub use customer_editor::{AddCustomer, EditCustomer};

mod bulk;
pub use bulk::BulkAddCustomer;

mod users;
pub use users::ManageUsers;

mod not_found;
pub use not_found::NotFound;
