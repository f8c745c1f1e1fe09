mod state;
mod wizard;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
#[cfg(test)]
mod wizard_smoke;

pub use state::ViewError;
pub use wizard::{WizardPage, WizardView};
