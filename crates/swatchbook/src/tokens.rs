//! Token sync planning: semantic palette → variables API operations.
//!
//! The sync never diffs against remote state. Leaving half-written remote
//! state in place is not assumed safe, so every plan purges the
//! destination collection up front and recreates it from the palette in
//! one batch.

use swatchbook_style::SemanticPalette;

use crate::remote::{
    CollectionOp, ModeOp, ModeValueOp, OpAction, RemoteVariablesDoc, VariableOp, VariablesPayload,
};

/// Name of the collection the sync owns. Collections with other names are
/// never touched.
pub const COLLECTION_NAME: &str = "Semantic colors";

/// Mode names within the owned collection.
pub const LIGHT_MODE: &str = "Light";
pub const DARK_MODE: &str = "Dark";

const TMP_COLLECTION: &str = "tmp:collection";
const TMP_LIGHT_MODE: &str = "tmp:mode:light";
const TMP_DARK_MODE: &str = "tmp:mode:dark";

/// Builds the purge-then-recreate operation batch for one sync.
///
/// Delete operations for the existing owned collection (variables first,
/// then the collection) come before the create operations, so the batch
/// replays cleanly on a destination in any state.
pub fn build_sync_payload(
    palette: &SemanticPalette,
    existing: &RemoteVariablesDoc,
) -> VariablesPayload {
    let mut payload = VariablesPayload::default();

    for collection in existing
        .variable_collections
        .values()
        .filter(|collection| collection.name == COLLECTION_NAME)
    {
        for variable in existing
            .variables
            .values()
            .filter(|variable| variable.variable_collection_id == collection.id)
        {
            payload.variables.push(VariableOp {
                action: OpAction::Delete,
                id: variable.id.clone(),
                name: None,
                variable_collection_id: collection.id.clone(),
                resolved_type: None,
            });
        }
        payload.variable_collections.push(CollectionOp {
            action: OpAction::Delete,
            id: collection.id.clone(),
            name: None,
            initial_mode_id: None,
        });
    }

    payload.variable_collections.push(CollectionOp {
        action: OpAction::Create,
        id: TMP_COLLECTION.to_string(),
        name: Some(COLLECTION_NAME.to_string()),
        initial_mode_id: Some(TMP_LIGHT_MODE.to_string()),
    });
    // The initial mode is renamed in place; the dark mode is new.
    payload.variable_modes.push(ModeOp {
        action: OpAction::Update,
        id: TMP_LIGHT_MODE.to_string(),
        name: Some(LIGHT_MODE.to_string()),
        variable_collection_id: TMP_COLLECTION.to_string(),
    });
    payload.variable_modes.push(ModeOp {
        action: OpAction::Create,
        id: TMP_DARK_MODE.to_string(),
        name: Some(DARK_MODE.to_string()),
        variable_collection_id: TMP_COLLECTION.to_string(),
    });

    for name in palette.names() {
        let Some(token) = palette.color(name) else {
            continue;
        };
        let variable_id = format!("tmp:var:{name}");
        payload.variables.push(VariableOp {
            action: OpAction::Create,
            id: variable_id.clone(),
            name: Some(name.to_string()),
            variable_collection_id: TMP_COLLECTION.to_string(),
            resolved_type: Some("COLOR".to_string()),
        });
        payload.variable_mode_values.push(ModeValueOp {
            variable_id: variable_id.clone(),
            mode_id: TMP_LIGHT_MODE.to_string(),
            value: token.light.into(),
        });
        payload.variable_mode_values.push(ModeValueOp {
            variable_id,
            mode_id: TMP_DARK_MODE.to_string(),
            value: token.dark.into(),
        });
    }

    payload
}

/// Pairs remote variables with local palette entries by identical
/// light/dark values, for variables whose names no longer exist locally.
///
/// Returns `(remote name, local name)` pairs, sorted by remote name — the
/// migration map printed for documentation before a sync renames things.
pub fn rename_map(
    palette: &SemanticPalette,
    existing: &RemoteVariablesDoc,
) -> Vec<(String, String)> {
    let mut renames = Vec::new();

    for collection in existing
        .variable_collections
        .values()
        .filter(|collection| collection.name == COLLECTION_NAME)
    {
        let mode_id = |mode_name: &str| {
            collection
                .modes
                .iter()
                .find(|mode| mode.name == mode_name)
                .map(|mode| mode.mode_id.clone())
        };
        let (Some(light_mode), Some(dark_mode)) = (mode_id(LIGHT_MODE), mode_id(DARK_MODE)) else {
            continue;
        };

        for variable in existing
            .variables
            .values()
            .filter(|variable| variable.variable_collection_id == collection.id)
        {
            if palette.contains(&variable.name) {
                continue;
            }
            let (Some(light), Some(dark)) = (
                variable.values_by_mode.get(&light_mode),
                variable.values_by_mode.get(&dark_mode),
            ) else {
                continue;
            };

            let matched = palette.names().find(|&name| {
                palette.color(name).is_some_and(|token| {
                    token.light == light.to_rgba() && token.dark == dark.to_rgba()
                })
            });
            if let Some(local) = matched {
                renames.push((variable.name.clone(), local.to_string()));
            }
        }
    }

    renames.sort();
    renames
}
