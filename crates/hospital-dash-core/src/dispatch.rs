//! Action table.
//!
//! Rendered markup carries `data-action` (and, where needed, `data-id`)
//! attributes. The host reads them back off the clicked element and hands
//! them to [`Action::parse`]; the controller then runs the matching command.

use thiserror::Error;

use crate::models::RecordId;
use crate::ui::Section;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DispatchError {
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Action '{0}' needs an argument")]
    MissingArgument(&'static str),

    #[error("Invalid argument for '{action}': {value}")]
    InvalidArgument { action: &'static str, value: String },
}

pub type DispatchResult<T> = Result<T, DispatchError>;

/// Every command reachable from a click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Raw target; unknown targets are ignored by the router
    Navigate(String),
    ViewPatient(RecordId),
    ViewSurgery(RecordId),
    UpdateStatus(RecordId),
    Restock(RecordId),
    MarkRead(RecordId),
    MarkAllRead,
    AddPatient,
    ScheduleSurgery,
    AddSupplyRow,
    RemoveSupplyRow(u32),
    ClearSurgeryFilters,
    DismissToast(String),
    CloseModal,
    ModalOverlay,
    ToggleSidebar,
    ToggleNotifications,
    ToggleUserMenu,
    ClickOutside,
    ViewAllSurgeries,
    ViewAllSupplies,
}

impl Action {
    /// Value of the `data-action` attribute.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Navigate(_) => "navigate",
            Action::ViewPatient(_) => "view-patient",
            Action::ViewSurgery(_) => "view-surgery",
            Action::UpdateStatus(_) => "update-status",
            Action::Restock(_) => "restock",
            Action::MarkRead(_) => "mark-read",
            Action::MarkAllRead => "mark-all-read",
            Action::AddPatient => "add-patient",
            Action::ScheduleSurgery => "schedule-surgery",
            Action::AddSupplyRow => "add-supply-row",
            Action::RemoveSupplyRow(_) => "remove-supply-row",
            Action::ClearSurgeryFilters => "clear-surgery-filters",
            Action::DismissToast(_) => "dismiss-toast",
            Action::CloseModal => "close-modal",
            Action::ModalOverlay => "modal-overlay",
            Action::ToggleSidebar => "toggle-sidebar",
            Action::ToggleNotifications => "toggle-notifications",
            Action::ToggleUserMenu => "toggle-user-menu",
            Action::ClickOutside => "click-outside",
            Action::ViewAllSurgeries => "view-all-surgeries",
            Action::ViewAllSupplies => "view-all-supplies",
        }
    }

    /// Value of the `data-id` attribute, if the action takes one.
    pub fn argument(&self) -> Option<String> {
        match self {
            Action::Navigate(target) => Some(target.clone()),
            Action::ViewPatient(id)
            | Action::ViewSurgery(id)
            | Action::UpdateStatus(id)
            | Action::Restock(id)
            | Action::MarkRead(id) => Some(id.to_string()),
            Action::RemoveSupplyRow(key) => Some(key.to_string()),
            Action::DismissToast(id) => Some(id.clone()),
            _ => None,
        }
    }

    /// Decode a `data-action` / `data-id` pair.
    pub fn parse(name: &str, argument: Option<&str>) -> DispatchResult<Action> {
        let argument = argument.map(str::trim).filter(|a| !a.is_empty());
        let action = match name.trim() {
            "navigate" => Action::Navigate(text_arg("navigate", argument)?),
            "view-patient" => Action::ViewPatient(id_arg("view-patient", argument)?),
            "view-surgery" => Action::ViewSurgery(id_arg("view-surgery", argument)?),
            "update-status" => Action::UpdateStatus(id_arg("update-status", argument)?),
            "restock" => Action::Restock(id_arg("restock", argument)?),
            "mark-read" => Action::MarkRead(id_arg("mark-read", argument)?),
            "mark-all-read" => Action::MarkAllRead,
            "add-patient" => Action::AddPatient,
            "schedule-surgery" => Action::ScheduleSurgery,
            "add-supply-row" => Action::AddSupplyRow,
            "remove-supply-row" => {
                let raw = text_arg("remove-supply-row", argument)?;
                let key = raw.parse().map_err(|_| DispatchError::InvalidArgument {
                    action: "remove-supply-row",
                    value: raw.clone(),
                })?;
                Action::RemoveSupplyRow(key)
            }
            "clear-surgery-filters" => Action::ClearSurgeryFilters,
            "dismiss-toast" => Action::DismissToast(text_arg("dismiss-toast", argument)?),
            "close-modal" => Action::CloseModal,
            "modal-overlay" => Action::ModalOverlay,
            "toggle-sidebar" => Action::ToggleSidebar,
            "toggle-notifications" => Action::ToggleNotifications,
            "toggle-user-menu" => Action::ToggleUserMenu,
            "click-outside" => Action::ClickOutside,
            "view-all-surgeries" => Action::ViewAllSurgeries,
            "view-all-supplies" => Action::ViewAllSupplies,
            other => return Err(DispatchError::UnknownAction(other.to_string())),
        };
        Ok(action)
    }

    /// `data-action="..."` plus `data-id="..."` when there is an argument.
    pub fn data_attrs(&self) -> String {
        match self.argument() {
            Some(arg) => format!(
                r#"data-action="{}" data-id="{}""#,
                self.name(),
                crate::render::escape(&arg)
            ),
            None => format!(r#"data-action="{}""#, self.name()),
        }
    }

    pub fn navigate(section: Section) -> Action {
        Action::Navigate(section.slug().to_string())
    }
}

fn text_arg(action: &'static str, argument: Option<&str>) -> DispatchResult<String> {
    argument
        .map(str::to_string)
        .ok_or(DispatchError::MissingArgument(action))
}

fn id_arg(action: &'static str, argument: Option<&str>) -> DispatchResult<RecordId> {
    let raw = argument.ok_or(DispatchError::MissingArgument(action))?;
    raw.parse().map_err(|_| DispatchError::InvalidArgument {
        action,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_ids() {
        assert_eq!(Action::parse("view-patient", Some("12")), Ok(Action::ViewPatient(12)));
        assert_eq!(Action::parse("restock", Some(" 4 ")), Ok(Action::Restock(4)));
        assert_eq!(
            Action::parse("navigate", Some("nav-surgeries")),
            Ok(Action::Navigate("nav-surgeries".into()))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Action::parse("view-patient", None),
            Err(DispatchError::MissingArgument("view-patient"))
        );
        assert_eq!(
            Action::parse("mark-read", Some("abc")),
            Err(DispatchError::InvalidArgument { action: "mark-read", value: "abc".into() })
        );
        assert_eq!(
            Action::parse("delete-everything", None),
            Err(DispatchError::UnknownAction("delete-everything".into()))
        );
    }

    #[test]
    fn test_attrs_parse_back() {
        let actions = [
            Action::UpdateStatus(3),
            Action::MarkAllRead,
            Action::RemoveSupplyRow(2),
            Action::navigate(Section::OperatingRooms),
        ];
        for action in actions {
            assert_eq!(
                Action::parse(action.name(), action.argument().as_deref()),
                Ok(action.clone())
            );
        }
        assert_eq!(Action::ViewSurgery(9).data_attrs(), r#"data-action="view-surgery" data-id="9""#);
        assert_eq!(Action::CloseModal.data_attrs(), r#"data-action="close-modal""#);
    }
}
