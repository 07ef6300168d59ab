#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub struct Height(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub struct Width(pub usize);
