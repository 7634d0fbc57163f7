/// Failed to parse a [`Team`] from a [`char`].
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0} is not a valid Tic-Tac-Toe team")]
pub struct InvalidCharError(pub char);

/// Failed to parse a [`Team`] from a [`str`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum InvalidStrError {
    /// The string is the wrong length. It must contain exactly one ascii char.
    ///
    /// The length is in bytes.
    #[error("a Tic-Tac-Toe team cannot be made from inputs of length {0}")]
    InvalidLength(usize),

    /// The char is not valid.
    #[error(transparent)]
    InvalidChar(#[from] InvalidCharError),
}

/// A Tic Tac Toe Team.
///
/// `X` is player one and the maximizing side of the search.
/// `O` is player two.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Team {
    X,
    O,
}

impl Team {
    /// Invert the teams
    #[must_use]
    pub fn inverse(self) -> Self {
        match self {
            Self::X => Self::O,
            Self::O => Self::X,
        }
    }

    /// Try to parse a [`Team`] from a [`char`].
    pub fn from_char(c: char) -> Result<Self, InvalidCharError> {
        match c {
            'x' | 'X' | '1' => Ok(Self::X),
            'o' | 'O' | '2' => Ok(Self::O),
            c => Err(InvalidCharError(c)),
        }
    }

    /// Get the char used to display this team.
    pub fn as_char(self) -> char {
        match self {
            Self::X => 'X',
            Self::O => 'O',
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl std::str::FromStr for Team {
    type Err = InvalidStrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // This may be in bytes but this only works if the first char is ascii.
        // Therefore, this is fine.
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if s.len() == 1 => Ok(Self::from_char(c)?),
            _ => Err(InvalidStrError::InvalidLength(s.len())),
        }
    }
}
