use crate::{
    error::{BridgeError, Result},
    models::{ImportRequest, TaskQuery},
};

/// Input checks applied at the tool boundary before any collaborator is called
pub struct InputValidator;

impl InputValidator {
    /// Validate a required string field
    ///
    /// # Arguments
    /// * `field` - Wire name of the field, used in the error message
    /// * `value` - The value to check
    ///
    /// # Returns
    /// * `Ok(())` - If the value has non-whitespace content
    /// * `Err(BridgeError::Validation)` - If the value is empty or blank
    pub fn validate_required(field: &str, value: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(BridgeError::empty_field(field));
        }
        Ok(())
    }

    /// Validate the caller identity
    pub fn validate_username(username: &str) -> Result<()> {
        Self::validate_required("username", username)
    }

    /// Validate a task query
    pub fn validate_task_query(query: &TaskQuery) -> Result<()> {
        Self::validate_required("projectId", &query.project_id)?;
        Self::validate_required("jiraProject", &query.jira_project)?;
        Ok(())
    }

    /// Validate an import request
    ///
    /// The task list must be non-empty and every id must have content.
    /// Ids are not checked against any earlier fetch.
    pub fn validate_import_request(request: &ImportRequest) -> Result<()> {
        Self::validate_required("projectId", &request.project_id)?;
        Self::validate_required("jiraProject", &request.jira_project)?;

        if request.task_ids.is_empty() {
            return Err(BridgeError::Validation(
                "Field 'jiraTasks' must contain at least one task id".to_string(),
            ));
        }

        if let Some(position) = request.task_ids.iter().position(|id| id.trim().is_empty()) {
            return Err(BridgeError::Validation(format!(
                "Field 'jiraTasks' contains an empty task id at index {position}"
            )));
        }

        Ok(())
    }
}
