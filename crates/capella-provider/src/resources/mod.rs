//! Resource handlers

mod bucket;
mod database_user;
mod project;

pub use bucket::BucketResource;
pub use database_user::DatabaseUserResource;
pub use project::ProjectResource;

use crate::error::ProviderError;
use capella_client::ClientError;
use capella_plugin::{DiagResult, Diagnostics, ResourceData};

/// Names of `choices`, in the order the schema lists them
fn choice_names<T>(choices: &[T], name: fn(&T) -> &'static str) -> Vec<&'static str> {
    choices.iter().map(name).collect()
}

/// Parse an enumerated attribute, using `default` when it is unset
///
/// An unknown value is a diagnostic listing the same choices the schema
/// passes to `one_of`.
fn parse_choice<T: Copy>(
    data: &ResourceData,
    attribute: &'static str,
    choices: &[T],
    name: fn(&T) -> &'static str,
    default: T,
) -> DiagResult<T> {
    let Some(raw) = data.get_str(attribute) else {
        return Ok(default);
    };
    choices
        .iter()
        .copied()
        .find(|choice| name(choice) == raw)
        .ok_or_else(|| {
            Diagnostics::from_err(ProviderError::InvalidValue {
                attribute,
                expected: choice_names(choices, name).join(", "),
            })
        })
}

/// Apply the result of a Show call to `data`
///
/// A 404 means the remote object is gone: the id is cleared and no error
/// is raised. Any other failure is surfaced unchanged.
fn refresh<T>(
    data: &mut ResourceData,
    result: Result<T, ClientError>,
    apply: impl FnOnce(&mut ResourceData, T),
) -> DiagResult {
    match result {
        Ok(remote) => {
            apply(data, remote);
            Ok(())
        }
        Err(e) if e.is_not_found() => {
            tracing::warn!(
                "Remote object {} not found, removing from state",
                data.id().unwrap_or_default()
            );
            data.clear_id();
            Ok(())
        }
        Err(e) => Err(Diagnostics::from_err(e)),
    }
}
