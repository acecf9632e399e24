#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purpose {
    Buy,
    Sell,
}

impl Purpose {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "buy" => Some(Self::Buy),
            "sell" => Some(Self::Sell),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Buy => "Buying",
            Self::Sell => "Selling",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PurposeState {
    #[default]
    Unset,
    Selected(Purpose),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurposeTransition {
    pub from: PurposeState,
    pub to: Purpose,
}

/// Gate in front of the form: inputs stay disabled until a purpose is chosen.
#[derive(Debug, Clone, Copy, Default)]
pub struct PurposeSelector {
    state: PurposeState,
}

impl PurposeSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn restored(purpose: Option<Purpose>) -> Self {
        Self {
            state: purpose.map_or(PurposeState::Unset, PurposeState::Selected),
        }
    }

    pub fn state(&self) -> PurposeState {
        self.state
    }

    pub fn purpose(&self) -> Option<Purpose> {
        match self.state {
            PurposeState::Unset => None,
            PurposeState::Selected(purpose) => Some(purpose),
        }
    }

    pub fn inputs_enabled(&self) -> bool {
        self.purpose().is_some()
    }

    /// Every selection, including re-selecting the current purpose, is a
    /// transition; callers clear the form on each one.
    pub fn select(&mut self, purpose: Purpose) -> PurposeTransition {
        let from = self.state;
        self.state = PurposeState::Selected(purpose);
        PurposeTransition { from, to: purpose }
    }
}
