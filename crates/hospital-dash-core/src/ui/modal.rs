//! Overlay and dialog visibility.

/// Every dialog the dashboard can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalId {
    AddPatient,
    ScheduleSurgery,
    ViewPatient,
    ViewSurgery,
    UpdateStatus,
    RestockSupply,
}

impl ModalId {
    pub const ALL: [ModalId; 6] = [
        ModalId::AddPatient,
        ModalId::ScheduleSurgery,
        ModalId::ViewPatient,
        ModalId::ViewSurgery,
        ModalId::UpdateStatus,
        ModalId::RestockSupply,
    ];

    /// Element id in the rendered markup.
    pub fn dom_id(&self) -> &'static str {
        match self {
            ModalId::AddPatient => "addPatientModal",
            ModalId::ScheduleSurgery => "scheduleSurgeryModal",
            ModalId::ViewPatient => "viewPatientModal",
            ModalId::ViewSurgery => "viewSurgeryModal",
            ModalId::UpdateStatus => "updateStatusModal",
            ModalId::RestockSupply => "restockSupplyModal",
        }
    }
}

/// Where a click inside the modal layer landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalClick {
    Overlay,
    CloseControl,
    /// Inside a dialog's content; never closes
    Content,
}

/// Show/hide state for the overlay and dialogs.
///
/// Opening a second dialog while one is visible is allowed; callers avoid it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModalController {
    visible: Vec<ModalId>,
    scroll_locked: bool,
}

impl ModalController {
    /// Show the overlay and `id`, and lock background scroll.
    pub fn show(&mut self, id: ModalId) {
        if !self.visible.contains(&id) {
            self.visible.push(id);
        }
        self.scroll_locked = true;
    }

    /// Hide the overlay and every dialog, and restore scroll.
    pub fn close(&mut self) {
        self.visible.clear();
        self.scroll_locked = false;
    }

    /// Route a click; returns true when it closed the layer.
    pub fn click(&mut self, target: ModalClick) -> bool {
        match target {
            ModalClick::Overlay | ModalClick::CloseControl => {
                self.close();
                true
            }
            ModalClick::Content => false,
        }
    }

    pub fn overlay_visible(&self) -> bool {
        !self.visible.is_empty()
    }

    pub fn is_open(&self, id: ModalId) -> bool {
        self.visible.contains(&id)
    }

    /// Most recently shown dialog.
    pub fn active(&self) -> Option<ModalId> {
        self.visible.last().copied()
    }

    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }
}
