mod wizard_vm;

pub use wizard_vm::{QuestionVm, StepAction, StepVm, WizardIntent, WizardVm};
