use std::sync::Arc;

use dioxus::prelude::*;
use weekend_core::navigator::Navigator;

use crate::context::AppContext;
use crate::views::ViewError;
use crate::vm::{QuestionVm, StepAction, StepVm, WizardIntent, WizardVm};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq, Eq)]
enum ExportState {
    Idle,
    Saved(String),
    Failed,
}

#[component]
pub fn WizardPage() -> Element {
    rsx! { WizardView {} }
}

/// The step form, or the report preview once the user gets there.
///
/// Every session starts on the first step; answers and flags come from the
/// loaded `SessionStore`.
#[component]
pub fn WizardView(start: Option<Navigator>) -> Element {
    let ctx = use_context::<AppContext>();
    let vm = use_signal(|| {
        let vm = WizardVm::new(ctx.session().snapshot());
        match start {
            Some(navigator) => vm.with_navigator(navigator),
            None => vm,
        }
    });
    let error = use_signal(|| None::<ViewError>);
    let export_state = use_signal(|| ExportState::Idle);

    let dispatch_intent = {
        let session = ctx.session();
        let reports = ctx.reports();
        use_callback(move |intent: WizardIntent| {
            let mut vm = vm;
            let mut error = error;
            let mut export_state = export_state;
            match intent {
                WizardIntent::Answer { question, value } => {
                    let Some(phase) = vm.peek().current_phase() else {
                        return;
                    };
                    if let Err(err) = vm.write().set_answer(question, value.clone()) {
                        error.set(Some(err));
                        return;
                    }

                    let session = Arc::clone(&session);
                    spawn(async move {
                        match session.set_answer(phase, question, value).await {
                            Ok(()) => error.set(None),
                            Err(err) => {
                                tracing::warn!(
                                    phase = phase.name(),
                                    error = %err,
                                    "answer not saved"
                                );
                                error.set(Some(ViewError::SaveFailed));
                            }
                        }
                    });
                }
                WizardIntent::SetComplete(complete) => {
                    let Some(phase) = vm.peek().current_phase() else {
                        return;
                    };
                    vm.write().set_complete(complete);

                    let session = Arc::clone(&session);
                    spawn(async move {
                        match session.set_complete(phase, complete).await {
                            Ok(()) => error.set(None),
                            Err(err) => {
                                tracing::warn!(
                                    phase = phase.name(),
                                    error = %err,
                                    "completion flag not saved"
                                );
                                error.set(Some(ViewError::SaveFailed));
                            }
                        }
                    });
                }
                WizardIntent::Advance => {
                    vm.write().advance();
                }
                WizardIntent::EnterPreview => {
                    if vm.write().enter_preview() {
                        export_state.set(ExportState::Idle);
                    }
                }
                WizardIntent::ExitPreview => {
                    vm.write().exit_preview();
                }
                WizardIntent::Download => {
                    let report = vm.peek().report();
                    match reports.export(&report) {
                        Ok(path) => {
                            export_state.set(ExportState::Saved(path.display().to_string()));
                        }
                        Err(err) => {
                            tracing::warn!(error = %err, "report export failed");
                            export_state.set(ExportState::Failed);
                        }
                    }
                }
            }
        })
    };

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<WizardTestHandles>() {
                handles.register(dispatch_intent, vm, error);
            }
        }
    }

    let step = vm.read().step();

    rsx! {
        match step {
            Some(step) => rsx! {
                StepPanel { step, on_intent: dispatch_intent }
            },
            None => rsx! {
                PreviewPanel { vm, export_state, on_intent: dispatch_intent }
            },
        }
        if let Some(err) = error() {
            p { class: "status status--error", "{err.message()}" }
        }
    }
}

#[component]
fn StepPanel(step: StepVm, on_intent: Callback<WizardIntent>) -> Element {
    rsx! {
        section { class: "card step",
            h2 { "{step.heading}" }
            p { "Answer each of the following questions to complete this step:" }

            for item in step.questions.iter().cloned() {
                QuestionField { key: "{item.question}", item, on_intent }
            }

            if !step.tools.is_empty() {
                div { class: "tools",
                    h3 { "Helpful Tools" }
                    ul {
                        for tool in step.tools.iter() {
                            li { key: "{tool.url()}",
                                a {
                                    href: tool.url(),
                                    target: "_blank",
                                    rel: "noopener noreferrer",
                                    "🔗 {tool.label()}"
                                }
                            }
                        }
                    }
                }
            }

            label { class: "complete",
                input {
                    r#type: "checkbox",
                    checked: step.complete,
                    onchange: move |evt: FormEvent| {
                        on_intent.call(WizardIntent::SetComplete(evt.checked()));
                    },
                }
                "Mark this step as completed"
            }

            div { class: "actions",
                match step.action {
                    StepAction::Next => rsx! {
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            onclick: move |_| on_intent.call(WizardIntent::Advance),
                            "Next Step"
                        }
                    },
                    StepAction::Preview => rsx! {
                        button {
                            class: "btn btn-success",
                            r#type: "button",
                            onclick: move |_| on_intent.call(WizardIntent::EnterPreview),
                            "Preview Report"
                        }
                    },
                }
            }
        }
    }
}

#[component]
fn QuestionField(item: QuestionVm, on_intent: Callback<WizardIntent>) -> Element {
    let question = item.question;

    rsx! {
        div { class: "question",
            label { "{question}" }
            textarea {
                rows: "3",
                placeholder: "Your answer...",
                value: "{item.answer}",
                oninput: move |evt: FormEvent| {
                    on_intent.call(WizardIntent::Answer {
                        question,
                        value: evt.value(),
                    });
                },
            }
        }
    }
}

#[component]
fn PreviewPanel(
    vm: Signal<WizardVm>,
    export_state: Signal<ExportState>,
    on_intent: Callback<WizardIntent>,
) -> Element {
    let report = vm.read().report();

    rsx! {
        section { class: "card preview",
            h2 { "📄 Report Preview" }
            pre { class: "report", "{report}" }

            div { class: "actions",
                button {
                    class: "btn btn-success",
                    r#type: "button",
                    onclick: move |_| on_intent.call(WizardIntent::Download),
                    "Download Report"
                }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| on_intent.call(WizardIntent::ExitPreview),
                    "Back to Steps"
                }
            }

            match export_state() {
                ExportState::Idle => rsx! {},
                ExportState::Saved(path) => rsx! {
                    p { class: "status", "Saved to {path}" }
                },
                ExportState::Failed => rsx! {
                    p { class: "status status--error", "{ViewError::ExportFailed.message()}" }
                },
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct WizardTestHandles {
    dispatch: Rc<RefCell<Option<Callback<WizardIntent>>>>,
    vm: Rc<RefCell<Option<Signal<WizardVm>>>>,
    error: Rc<RefCell<Option<Signal<Option<ViewError>>>>>,
}

#[cfg(test)]
impl WizardTestHandles {
    pub(crate) fn register(
        &self,
        dispatch: Callback<WizardIntent>,
        vm: Signal<WizardVm>,
        error: Signal<Option<ViewError>>,
    ) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.vm.borrow_mut() = Some(vm);
        *self.error.borrow_mut() = Some(error);
    }

    pub(crate) fn dispatch(&self) -> Callback<WizardIntent> {
        (*self.dispatch.borrow()).expect("wizard dispatch registered")
    }

    pub(crate) fn vm(&self) -> Signal<WizardVm> {
        (*self.vm.borrow()).expect("wizard vm registered")
    }

    pub(crate) fn error(&self) -> Signal<Option<ViewError>> {
        (*self.error.borrow()).expect("wizard error registered")
    }
}
