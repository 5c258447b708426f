#[derive(Debug, Clone)]
pub enum Message {
    /// Any key was pressed; the viewer closes
    KeyPressed,
}
