use crate::models::{DocumentStatus, DocumentType};

impl DocumentStatus {
    /// Statuses reachable from `self`. The backend has the final say.
    pub fn next_statuses(&self) -> &'static [DocumentStatus] {
        use DocumentStatus::*;

        match self {
            Draft => &[NotSent, Cancelled],
            NotSent => &[Sent, Cancelled],
            Sent => &[Accepted, Rejected, Paid, PartiallyPaid],
            Accepted => &[Paid, PartiallyPaid, Cancelled],
            PartiallyPaid => &[Paid],
            Rejected | Paid | Cancelled => &[],
        }
    }

    pub fn can_transition_to(&self, target: DocumentStatus) -> bool {
        self.next_statuses().contains(&target)
    }

    pub fn is_terminal(&self) -> bool {
        self.next_statuses().is_empty()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Draft => "Borrador",
            Self::NotSent => "No enviado",
            Self::Sent => "Enviado",
            Self::Accepted => "Aceptado",
            Self::Rejected => "Rechazado",
            Self::Paid => "Pagado",
            Self::PartiallyPaid => "Pago parcial",
            Self::Cancelled => "Anulado",
        }
    }
}

impl DocumentType {
    /// Types a document of this type can be converted into
    pub fn conversion_targets(&self) -> &'static [DocumentType] {
        match self {
            Self::Quote => &[DocumentType::Invoice, DocumentType::DeliveryNote],
            Self::DeliveryNote => &[DocumentType::Invoice],
            Self::Invoice => &[],
        }
    }

    pub fn can_convert_to(&self, target: DocumentType) -> bool {
        self.conversion_targets().contains(&target)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionButton {
    pub target: DocumentStatus,
    pub label: &'static str,
}

/// Buttons offered on a document in `current`, in table order
pub fn transition_buttons(current: DocumentStatus) -> Vec<TransitionButton> {
    current
        .next_statuses()
        .iter()
        .map(|&target| TransitionButton {
            target,
            label: target.label(),
        })
        .collect()
}
