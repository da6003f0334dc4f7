use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, VaultError};
use crate::identify::{IdentifyRequest, Identifier};
use crate::model::SneakerDraft;
use tracing::warn;

/// Asks the identifier about `request` and reports what it found.
pub fn run(identifier: &dyn Identifier, request: &IdentifyRequest) -> Result<CmdResult> {
    if request.is_empty() {
        return Err(VaultError::Validation(
            "Provide an image or a text hint to identify.".to_string(),
        ));
    }
    let found = identifier.identify(request)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Identified {} {}",
        found.brand, found.model
    )));
    result.identification = Some(found);
    Ok(result)
}

/// Fills `draft` from the identifier's answer.
///
/// Never fails: on any error the draft is left exactly as it was and the
/// result carries an error message, so the user can keep typing by hand.
pub fn fill_draft(
    identifier: &dyn Identifier,
    request: &IdentifyRequest,
    draft: &mut SneakerDraft,
) -> CmdResult {
    let mut result = CmdResult::default();
    if request.is_empty() {
        result.add_message(CmdMessage::warning(
            "Nothing to identify: provide an image or a text hint.",
        ));
        return result;
    }

    match identifier.identify(request) {
        Ok(found) => {
            draft.apply_identification(&found);
            result.add_message(CmdMessage::success(format!(
                "Identified {} {}",
                found.brand, found.model
            )));
            result.identification = Some(found);
        }
        Err(e) => {
            warn!(error = %e, "Identification failed");
            result.add_message(CmdMessage::error(
                "Failed to identify sneaker. Please fill in the details manually.",
            ));
        }
    }
    result
}
