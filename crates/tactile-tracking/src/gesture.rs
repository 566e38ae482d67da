/// Hand gesture reported by the gesture recognizer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Gesture {
    /// No gesture recognized.
    #[default]
    None,
    /// Closed fist.
    ClosedFist,
    /// Open palm.
    OpenPalm,
    /// Index finger pointing up.
    PointingUp,
    /// Thumb down.
    ThumbDown,
    /// Thumb up.
    ThumbUp,
    /// Index and middle finger raised.
    Victory,
    /// A label this crate does not know.
    Other(String),
}

impl Gesture {
    /// Decode a recognizer category label, e.g. `"Thumb_Up"`.
    ///
    /// An empty label maps to [`Gesture::None`]; unknown labels are kept verbatim.
    pub fn from_label(label: &str) -> Self {
        match label {
            "" | "None" => Gesture::None,
            "Closed_Fist" => Gesture::ClosedFist,
            "Open_Palm" => Gesture::OpenPalm,
            "Pointing_Up" => Gesture::PointingUp,
            "Thumb_Down" => Gesture::ThumbDown,
            "Thumb_Up" => Gesture::ThumbUp,
            "Victory" => Gesture::Victory,
            other => Gesture::Other(other.to_string()),
        }
    }

    /// The recognizer category label.
    pub fn label(&self) -> &str {
        match self {
            Gesture::None => "None",
            Gesture::ClosedFist => "Closed_Fist",
            Gesture::OpenPalm => "Open_Palm",
            Gesture::PointingUp => "Pointing_Up",
            Gesture::ThumbDown => "Thumb_Down",
            Gesture::ThumbUp => "Thumb_Up",
            Gesture::Victory => "Victory",
            Gesture::Other(label) => label,
        }
    }

    /// Emoji used to display the gesture.
    pub fn symbol(&self) -> &'static str {
        match self {
            Gesture::None | Gesture::Other(_) => "❓",
            Gesture::ClosedFist => "✊",
            Gesture::OpenPalm => "✋",
            Gesture::PointingUp => "👆",
            Gesture::ThumbDown => "👎",
            Gesture::ThumbUp => "👍",
            Gesture::Victory => "✌️",
        }
    }
}

impl std::fmt::Display for Gesture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.symbol(), self.label())
    }
}
