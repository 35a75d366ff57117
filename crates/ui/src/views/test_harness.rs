use std::sync::Arc;

use course_core::Catalog;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use services::{AppServices, ProgressService};
use storage::repository::Storage;

use crate::context::{UiApp, build_app_context};
use crate::navigation::NavEntry;
use crate::views::Shell;
use crate::views::shell::ShellTestHandles;
use crate::vm::ViewIntent;

#[derive(Clone)]
struct TestApp {
    progress: Arc<ProgressService>,
    entry: NavEntry,
}

impl UiApp for TestApp {
    fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    fn initial_entry(&self) -> NavEntry {
        self.entry.clone()
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    handles: ShellTestHandles,
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
    use_context_provider(|| props.handles.clone());
    rsx! { Shell {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub progress: Arc<ProgressService>,
    handles: ShellTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    /// Send an intent the way a view would and apply its synchronous effects.
    pub fn send(&mut self, intent: ViewIntent) {
        self.handles.dispatch().call(intent);
        drive_dom(&mut self.dom);
    }

    /// Let spawned service calls finish and re-render what they touched.
    pub async fn drive_async(&mut self) {
        for _ in 0..2 {
            let _ = tokio::time::timeout(
                std::time::Duration::from_millis(50),
                self.dom.wait_for_work(),
            )
            .await;
            self.dom.render_immediate(&mut NoOpMutations);
            self.dom.process_events();
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub async fn setup_view_harness(entry: NavEntry) -> ViewHarness {
    setup_view_harness_with_storage(entry, Storage::in_memory()).await
}

pub async fn setup_view_harness_with_storage(entry: NavEntry, storage: Storage) -> ViewHarness {
    let catalog = Catalog::builtin().expect("builtin catalog");
    let services = AppServices::with_storage(storage, catalog).await;
    let progress = services.progress();
    let app = Arc::new(TestApp {
        progress: Arc::clone(&progress),
        entry,
    });
    let handles = ShellTestHandles::default();

    let dom = VirtualDom::new_with_props(
        ViewHarnessRoot,
        ViewHarnessProps {
            app,
            handles: handles.clone(),
        },
    );
    ViewHarness {
        dom,
        progress,
        handles,
    }
}
