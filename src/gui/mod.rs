mod app;
mod message;

pub use app::ScanViewer;
pub use message::Message;

use iced::widget::image::Handle;

/// Show `img` in a window and block until a key is pressed
pub fn show(title: &'static str, img: &image::DynamicImage) -> iced::Result {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let handle = Handle::from_rgba(width, height, rgba.into_raw());

    iced::application(
        move || ScanViewer::new(handle.clone()),
        ScanViewer::update,
        ScanViewer::view,
    )
    .title(title)
    .subscription(ScanViewer::subscription)
    .window_size(iced::Size::new(width as f32, height as f32))
    .run()
}
