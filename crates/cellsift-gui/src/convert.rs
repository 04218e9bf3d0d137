use cellsift_core::geometry::Point;
use cellsift_core::highlight::OutlineColor;
use cellsift_core::io::loader::ProjectionImage;

/// Convert the 8-bit grayscale projection to an egui ColorImage.
pub fn projection_to_color_image(image: &ProjectionImage) -> egui::ColorImage {
    egui::ColorImage::from_gray([image.width, image.height], &image.pixels)
}

pub fn outline_color(color: OutlineColor) -> egui::Color32 {
    let [r, g, b] = color.rgb();
    egui::Color32::from_rgb(r, g, b)
}

/// Viewport-relative core point to an absolute egui position.
pub fn to_pos(origin: egui::Pos2, p: Point) -> egui::Pos2 {
    egui::pos2(origin.x + p.x, origin.y + p.y)
}

/// Absolute egui position to a viewport-relative core point.
pub fn to_point(origin: egui::Pos2, pos: egui::Pos2) -> Point {
    Point::new(pos.x - origin.x, pos.y - origin.y)
}
