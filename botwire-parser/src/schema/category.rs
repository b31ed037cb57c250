/// Whether a [`super::Definition`] is a data type or a Bot API method.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    /// A data type (the section before `---functions---`).
    Types,
    /// A remote method (the section after `---functions---`).
    Functions,
}
