use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable};

use crate::views::WizardPage;

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", WizardPage)] Wizard {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        main { class: "app",
            h1 { class: "app-title", "🛠️ Build Your SaaS in a Weekend" }
            Outlet::<Route> {}
        }
    }
}
