// ============================================================================
// UI STATE - Máquina de estados de modales (reducer puro, sin DOM)
// ============================================================================
// `UiState::apply` es el único setter. Las vistas solo leen el estado y
// sincronizan el DOM a partir de él.
// ============================================================================

use crate::models::DetailForm;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportModalMode {
    Create,
    Edit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    Editable,
    ReadOnly,
}

/// Modal visible. Nunca hay más de uno abierto.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Modal {
    #[default]
    Closed,
    Report { mode: ReportModalMode },
    DetailForm { mode: FormMode },
    CancelConfirm,
    CancelReason,
    Help,
}

impl Modal {
    pub fn is_open(&self) -> bool {
        !matches!(self, Modal::Closed)
    }
}

/// Identifica una "sesión" de modal. Los resultados async que llegan con un
/// ticket viejo se descartan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModalTicket {
    epoch: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum UiAction {
    OpenCreateReport,
    OpenEditReport { report_id: i64 },
    OpenDetailForm { report_id: i64 },
    OpenCompletedForm { report_id: i64 },
    ExistingFormLoaded { ticket: ModalTicket, form: Option<DetailForm> },
    CompletedFormUnavailable { ticket: ModalTicket },
    RequestCancel { report_id: i64 },
    ConfirmCancel,
    OpenHelp,
    Close,
    /// Cierra solo si el modal sigue siendo el del ticket (fin de un submit)
    Finish { ticket: ModalTicket },
    SelectionChanged { has_selection: bool },
    ResetSession,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollLock {
    Unchanged,
    Lock,
    Release,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    /// Ticket del modal recién abierto
    pub ticket: Option<ModalTicket>,
    pub scroll: ScrollLock,
}

impl Transition {
    fn none() -> Self {
        Self {
            ticket: None,
            scroll: ScrollLock::Unchanged,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct UiState {
    modal: Modal,
    active_report_id: Option<i64>,
    existing_form: Option<DetailForm>,
    auto_update: bool,
    epoch: u64,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            modal: Modal::Closed,
            active_report_id: None,
            existing_form: None,
            auto_update: true,
            epoch: 0,
        }
    }
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn modal(&self) -> Modal {
        self.modal
    }

    pub fn active_report_id(&self) -> Option<i64> {
        self.active_report_id
    }

    pub fn existing_form(&self) -> Option<&DetailForm> {
        self.existing_form.as_ref()
    }

    pub fn auto_update(&self) -> bool {
        self.auto_update
    }

    pub fn is_read_only(&self) -> bool {
        matches!(self.modal, Modal::DetailForm { mode: FormMode::ReadOnly })
    }

    /// Ticket del modal abierto, para trabajo async iniciado desde él
    pub fn ticket(&self) -> Option<ModalTicket> {
        self.modal.is_open().then_some(ModalTicket { epoch: self.epoch })
    }

    pub fn is_current(&self, ticket: ModalTicket) -> bool {
        self.modal.is_open() && ticket.epoch == self.epoch
    }

    pub fn apply(&mut self, action: UiAction) -> Transition {
        match action {
            UiAction::OpenCreateReport => self.open(
                Modal::Report {
                    mode: ReportModalMode::Create,
                },
                None,
            ),
            UiAction::OpenEditReport { report_id } => self.open(
                Modal::Report {
                    mode: ReportModalMode::Edit,
                },
                Some(report_id),
            ),
            UiAction::OpenDetailForm { report_id } => self.open(
                Modal::DetailForm {
                    mode: FormMode::Editable,
                },
                Some(report_id),
            ),
            UiAction::OpenCompletedForm { report_id } => self.open(
                Modal::DetailForm {
                    mode: FormMode::ReadOnly,
                },
                Some(report_id),
            ),
            UiAction::RequestCancel { report_id } => self.open(Modal::CancelConfirm, Some(report_id)),
            UiAction::OpenHelp => self.open(Modal::Help, None),

            UiAction::ExistingFormLoaded { ticket, form } => {
                if !self.is_current(ticket) || !matches!(self.modal, Modal::DetailForm { .. }) {
                    log::info!("⏭️ [UI] Formulario recibido para un modal ya cerrado, se ignora");
                    return Transition::none();
                }
                if let Some(form) = form {
                    self.existing_form = Some(form);
                    self.modal = Modal::DetailForm {
                        mode: FormMode::ReadOnly,
                    };
                }
                Transition::none()
            }
            UiAction::CompletedFormUnavailable { ticket } => {
                if self.is_current(ticket) {
                    self.close()
                } else {
                    Transition::none()
                }
            }
            UiAction::ConfirmCancel => {
                if self.modal != Modal::CancelConfirm {
                    return Transition::none();
                }
                self.modal = Modal::CancelReason;
                self.epoch += 1;
                Transition {
                    ticket: self.ticket(),
                    scroll: ScrollLock::Unchanged,
                }
            }
            UiAction::Close => self.close(),
            UiAction::Finish { ticket } => {
                if self.is_current(ticket) {
                    self.close()
                } else {
                    Transition::none()
                }
            }
            UiAction::SelectionChanged { has_selection } => {
                self.auto_update = !has_selection;
                Transition::none()
            }
            UiAction::ResetSession => {
                let was_open = self.modal.is_open();
                *self = Self {
                    epoch: self.epoch + 1,
                    ..Self::default()
                };
                Transition {
                    ticket: None,
                    scroll: if was_open {
                        ScrollLock::Release
                    } else {
                        ScrollLock::Unchanged
                    },
                }
            }
        }
    }

    /// Abrir reemplaza cualquier modal abierto
    fn open(&mut self, modal: Modal, report_id: Option<i64>) -> Transition {
        let scroll = if self.modal.is_open() {
            ScrollLock::Unchanged
        } else {
            ScrollLock::Lock
        };
        self.modal = modal;
        self.active_report_id = report_id;
        self.existing_form = None;
        self.epoch += 1;
        Transition {
            ticket: self.ticket(),
            scroll,
        }
    }

    fn close(&mut self) -> Transition {
        if !self.modal.is_open() {
            return Transition::none();
        }
        self.modal = Modal::Closed;
        self.active_report_id = None;
        self.existing_form = None;
        self.epoch += 1;
        Transition {
            ticket: None,
            scroll: ScrollLock::Release,
        }
    }
}

// ============================================================================
// TECLADO
// ============================================================================

/// Tipo del elemento con foco (`document.activeElement`)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusTarget {
    Button,
    TextArea,
    Other,
    None,
}

impl FocusTarget {
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some(t) if t.eq_ignore_ascii_case("button") => FocusTarget::Button,
            Some(t) if t.eq_ignore_ascii_case("textarea") => FocusTarget::TextArea,
            Some(_) => FocusTarget::Other,
            None => FocusTarget::None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyIntent {
    SubmitReport,
    SubmitDetailForm,
    ConfirmCancel,
    SubmitCancelReason,
    Close,
    Ignore,
}

/// Traduce una tecla global a la intención sobre el modal abierto
pub fn resolve_key(key: &str, state: &UiState, focus: FocusTarget) -> KeyIntent {
    match key {
        "Escape" if state.modal().is_open() => KeyIntent::Close,
        "Enter" => resolve_enter(state, focus),
        _ => KeyIntent::Ignore,
    }
}

fn resolve_enter(state: &UiState, focus: FocusTarget) -> KeyIntent {
    let has_focus = focus != FocusTarget::None;
    match state.modal() {
        Modal::CancelConfirm => KeyIntent::ConfirmCancel,
        Modal::Report { .. } if has_focus && focus != FocusTarget::Button => KeyIntent::SubmitReport,
        Modal::DetailForm { .. }
            if has_focus
                && focus != FocusTarget::Button
                && !state.is_read_only()
                && state.existing_form().is_none() =>
        {
            KeyIntent::SubmitDetailForm
        }
        Modal::CancelReason if has_focus && focus != FocusTarget::TextArea => {
            KeyIntent::SubmitCancelReason
        }
        _ => KeyIntent::Ignore,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored_form() -> DetailForm {
        DetailForm {
            nombres: "Ana".to_string(),
            ..DetailForm::default()
        }
    }

    fn with_detail_open(report_id: i64) -> (UiState, ModalTicket) {
        let mut ui = UiState::new();
        let ticket = ui
            .apply(UiAction::OpenDetailForm { report_id })
            .ticket
            .unwrap();
        (ui, ticket)
    }

    #[test]
    fn starts_closed_with_polling_enabled() {
        let ui = UiState::new();
        assert_eq!(ui.modal(), Modal::Closed);
        assert_eq!(ui.active_report_id(), None);
        assert!(ui.auto_update());
        assert_eq!(ui.ticket(), None);
    }

    #[test]
    fn panic_button_opens_create_and_locks_scroll() {
        let mut ui = UiState::new();
        let t = ui.apply(UiAction::OpenCreateReport);
        assert_eq!(
            ui.modal(),
            Modal::Report {
                mode: ReportModalMode::Create
            }
        );
        assert_eq!(ui.active_report_id(), None);
        assert_eq!(t.scroll, ScrollLock::Lock);
        assert!(t.ticket.is_some());
    }

    #[test]
    fn opening_replaces_the_open_modal() {
        let mut ui = UiState::new();
        ui.apply(UiAction::OpenHelp);
        let t = ui.apply(UiAction::OpenEditReport { report_id: 3 });
        assert_eq!(
            ui.modal(),
            Modal::Report {
                mode: ReportModalMode::Edit
            }
        );
        assert_eq!(ui.active_report_id(), Some(3));
        assert_eq!(t.scroll, ScrollLock::Unchanged);
    }

    #[test]
    fn pending_report_with_stored_form_becomes_read_only() {
        let (mut ui, ticket) = with_detail_open(5);
        assert!(!ui.is_read_only());

        ui.apply(UiAction::ExistingFormLoaded {
            ticket,
            form: Some(stored_form()),
        });
        assert!(ui.is_read_only());
        assert_eq!(ui.existing_form().map(|f| f.nombres.as_str()), Some("Ana"));
        assert_eq!(ui.active_report_id(), Some(5));
    }

    #[test]
    fn missing_form_keeps_detail_editable() {
        let (mut ui, ticket) = with_detail_open(5);
        ui.apply(UiAction::ExistingFormLoaded { ticket, form: None });
        assert_eq!(
            ui.modal(),
            Modal::DetailForm {
                mode: FormMode::Editable
            }
        );
        assert!(ui.existing_form().is_none());
    }

    #[test]
    fn late_lookup_after_close_is_ignored() {
        let (mut ui, ticket) = with_detail_open(5);
        ui.apply(UiAction::Close);
        ui.apply(UiAction::ExistingFormLoaded {
            ticket,
            form: Some(stored_form()),
        });
        assert_eq!(ui.modal(), Modal::Closed);
        assert!(ui.existing_form().is_none());
    }

    #[test]
    fn late_lookup_for_another_report_is_ignored() {
        let (mut ui, old) = with_detail_open(5);
        ui.apply(UiAction::OpenDetailForm { report_id: 6 });
        ui.apply(UiAction::ExistingFormLoaded {
            ticket: old,
            form: Some(stored_form()),
        });
        assert!(!ui.is_read_only());
        assert_eq!(ui.active_report_id(), Some(6));
    }

    #[test]
    fn closing_detail_form_resets_selection_and_editability() {
        // Botón cerrar, click en overlay y Escape despachan la misma acción
        for key in [None, None, Some("Escape")] {
            let (mut ui, ticket) = with_detail_open(9);
            ui.apply(UiAction::ExistingFormLoaded {
                ticket,
                form: Some(stored_form()),
            });
            if let Some(key) = key {
                assert_eq!(resolve_key(key, &ui, FocusTarget::Other), KeyIntent::Close);
            }
            let t = ui.apply(UiAction::Close);
            assert_eq!(t.scroll, ScrollLock::Release);
            assert_eq!(ui.modal(), Modal::Closed);
            assert_eq!(ui.active_report_id(), None);
            assert!(ui.existing_form().is_none());
            assert!(!ui.is_read_only());
        }
    }

    #[test]
    fn close_when_closed_is_a_no_op() {
        let mut ui = UiState::new();
        assert_eq!(ui.apply(UiAction::Close).scroll, ScrollLock::Unchanged);
    }

    #[test]
    fn completed_form_opens_read_only_and_closes_when_unavailable() {
        let mut ui = UiState::new();
        let ticket = ui
            .apply(UiAction::OpenCompletedForm { report_id: 2 })
            .ticket
            .unwrap();
        assert!(ui.is_read_only());
        let t = ui.apply(UiAction::CompletedFormUnavailable { ticket });
        assert_eq!(ui.modal(), Modal::Closed);
        assert_eq!(t.scroll, ScrollLock::Release);
    }

    #[test]
    fn cancel_is_confirm_then_reason() {
        let mut ui = UiState::new();
        ui.apply(UiAction::RequestCancel { report_id: 4 });
        assert_eq!(ui.modal(), Modal::CancelConfirm);

        let t = ui.apply(UiAction::ConfirmCancel);
        assert_eq!(ui.modal(), Modal::CancelReason);
        assert_eq!(ui.active_report_id(), Some(4));
        assert_eq!(t.scroll, ScrollLock::Unchanged);
        assert!(t.ticket.is_some());
    }

    #[test]
    fn confirm_outside_confirmation_does_nothing() {
        let mut ui = UiState::new();
        ui.apply(UiAction::OpenHelp);
        ui.apply(UiAction::ConfirmCancel);
        assert_eq!(ui.modal(), Modal::Help);
    }

    #[test]
    fn finish_only_closes_its_own_modal() {
        let mut ui = UiState::new();
        let create = ui.apply(UiAction::OpenCreateReport).ticket.unwrap();
        ui.apply(UiAction::OpenHelp);
        ui.apply(UiAction::Finish { ticket: create });
        assert_eq!(ui.modal(), Modal::Help);

        let help = ui.ticket().unwrap();
        ui.apply(UiAction::Finish { ticket: help });
        assert_eq!(ui.modal(), Modal::Closed);
    }

    #[test]
    fn text_selection_suspends_polling() {
        let mut ui = UiState::new();
        ui.apply(UiAction::SelectionChanged { has_selection: true });
        assert!(!ui.auto_update());
        ui.apply(UiAction::SelectionChanged { has_selection: false });
        assert!(ui.auto_update());
    }

    #[test]
    fn session_reset_clears_everything_and_stales_tickets() {
        let (mut ui, ticket) = with_detail_open(8);
        ui.apply(UiAction::SelectionChanged { has_selection: true });

        let t = ui.apply(UiAction::ResetSession);
        assert_eq!(t.scroll, ScrollLock::Release);
        assert_eq!(ui.modal(), Modal::Closed);
        assert_eq!(ui.active_report_id(), None);
        assert!(ui.auto_update());
        assert!(!ui.is_current(ticket));
    }

    #[test]
    fn escape_closes_any_open_modal() {
        let mut ui = UiState::new();
        assert_eq!(resolve_key("Escape", &ui, FocusTarget::Other), KeyIntent::Ignore);
        ui.apply(UiAction::OpenHelp);
        assert_eq!(resolve_key("Escape", &ui, FocusTarget::Button), KeyIntent::Close);
    }

    #[test]
    fn enter_respects_focus_per_modal() {
        let mut ui = UiState::new();
        ui.apply(UiAction::OpenCreateReport);
        assert_eq!(resolve_key("Enter", &ui, FocusTarget::TextArea), KeyIntent::SubmitReport);
        assert_eq!(resolve_key("Enter", &ui, FocusTarget::Button), KeyIntent::Ignore);

        ui.apply(UiAction::RequestCancel { report_id: 1 });
        assert_eq!(resolve_key("Enter", &ui, FocusTarget::Button), KeyIntent::ConfirmCancel);

        ui.apply(UiAction::ConfirmCancel);
        assert_eq!(resolve_key("Enter", &ui, FocusTarget::TextArea), KeyIntent::Ignore);
        assert_eq!(
            resolve_key("Enter", &ui, FocusTarget::Other),
            KeyIntent::SubmitCancelReason
        );

        ui.apply(UiAction::OpenHelp);
        assert_eq!(resolve_key("Enter", &ui, FocusTarget::Other), KeyIntent::Ignore);
    }

    #[test]
    fn enter_never_submits_read_only_form() {
        let (mut ui, ticket) = with_detail_open(1);
        assert_eq!(
            resolve_key("Enter", &ui, FocusTarget::Other),
            KeyIntent::SubmitDetailForm
        );
        ui.apply(UiAction::ExistingFormLoaded {
            ticket,
            form: Some(stored_form()),
        });
        assert_eq!(resolve_key("Enter", &ui, FocusTarget::Other), KeyIntent::Ignore);
    }

    #[test]
    fn focus_from_tag_name() {
        assert_eq!(FocusTarget::from_tag(Some("BUTTON")), FocusTarget::Button);
        assert_eq!(FocusTarget::from_tag(Some("TEXTAREA")), FocusTarget::TextArea);
        assert_eq!(FocusTarget::from_tag(Some("INPUT")), FocusTarget::Other);
        assert_eq!(FocusTarget::from_tag(None), FocusTarget::None);
    }
}
