use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::Router;
use services::{AppServices, ReportService, SessionStore};
use storage::repository::{InMemoryStore, KeyValueStore, Storage};
use tempfile::TempDir;
use weekend_core::navigator::Navigator;

use crate::context::{UiApp, build_app_context};
use crate::routes::Route;
use crate::views::WizardView;
use crate::views::wizard::WizardTestHandles;
use crate::vm::WizardIntent;

#[derive(Clone)]
struct TestApp {
    session: Arc<SessionStore>,
    reports: Arc<ReportService>,
}

impl UiApp for TestApp {
    fn session(&self) -> Arc<SessionStore> {
        Arc::clone(&self.session)
    }

    fn reports(&self) -> Arc<ReportService> {
        Arc::clone(&self.reports)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Routed,
    Wizard(Navigator),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    handles: Option<WizardTestHandles>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewHarnessRoot(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    if let Some(handles) = props.handles.clone() {
        use_context_provider(|| handles);
    }
    match props.view {
        ViewKind::Routed => rsx! { Router::<Route> {} },
        ViewKind::Wizard(start) => rsx! { WizardView { start } },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub store: InMemoryStore,
    pub handles: Option<WizardTestHandles>,
    pub export_dir: TempDir,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }

    pub fn handles(&self) -> &WizardTestHandles {
        self.handles.as_ref().expect("wizard handles")
    }

    /// Dispatch `intent` and let any spawned saves run to completion.
    pub fn dispatch(&mut self, intent: WizardIntent) {
        self.handles().dispatch().call(intent);
        drive_dom(&mut self.dom);
        drive_dom(&mut self.dom);
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub async fn setup_view_harness(view: ViewKind) -> ViewHarness {
    setup_view_harness_with_store(view, InMemoryStore::new()).await
}

pub async fn setup_view_harness_with_store(view: ViewKind, store: InMemoryStore) -> ViewHarness {
    let kv: Arc<dyn KeyValueStore> = Arc::new(store.clone());
    setup_view_harness_with_backend(view, store, kv).await
}

/// Harness whose services write through `kv`; `store` is what tests inspect.
pub async fn setup_view_harness_with_backend(
    view: ViewKind,
    store: InMemoryStore,
    kv: Arc<dyn KeyValueStore>,
) -> ViewHarness {
    let storage = Storage { kv };
    let export_dir = tempfile::tempdir().expect("export dir");
    let services = AppServices::from_storage(&storage, export_dir.path())
        .await
        .expect("services");

    let app = Arc::new(TestApp {
        session: services.session(),
        reports: services.reports(),
    });
    let handles = match view {
        ViewKind::Wizard(_) => Some(WizardTestHandles::default()),
        ViewKind::Routed => None,
    };
    let dom = VirtualDom::new_with_props(
        ViewHarnessRoot,
        ViewHarnessProps {
            app,
            view,
            handles: handles.clone(),
        },
    );

    ViewHarness {
        dom,
        store,
        handles,
        export_dir,
    }
}

/// Navigator advanced to the last step.
pub fn last_step() -> Navigator {
    let mut navigator = Navigator::for_catalog();
    while navigator.advance() {}
    navigator
}

/// Navigator showing the report preview.
pub fn preview() -> Navigator {
    let mut navigator = last_step();
    navigator.enter_preview();
    navigator
}
