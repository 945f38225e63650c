#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Author {
    ListGenie,
    Model,
}

impl ToString for Author {
    fn to_string(&self) -> String {
        match self {
            Author::ListGenie => return String::from("ListGenie"),
            Author::Model => return String::from("Model"),
        }
    }
}
