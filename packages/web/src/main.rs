use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

use ui::SessionProvider;
use views::{
    AddCustomer, AppLayout, BulkAddCustomer, EditCustomer, Home, Login, ManageCustomer,
    ManageUsers, NotFound, PublicLayout, Register, Reset,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(PublicLayout)]
        #[route("/login")]
        Login {},
        #[route("/register")]
        Register {},
        #[route("/reset")]
        Reset {},
    #[end_layout]
    #[layout(AppLayout)]
        #[route("/")]
        Home {},
        #[route("/manageCustomer")]
        ManageCustomer {},
        #[route("/addCustomer")]
        AddCustomer {},
        #[route("/bulkAddCustomer")]
        BulkAddCustomer {},
        #[route("/editCustomer/:id")]
        EditCustomer { id: String },
        #[route("/users")]
        ManageUsers {},
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

const FAVICON: Asset = asset!("/assets/favicon.svg");
const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::logger::init(Level::INFO).expect("failed to init logger");
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Link { rel: "icon", href: FAVICON }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        SessionProvider {
            Router::<Route> {}
        }
    }
}
