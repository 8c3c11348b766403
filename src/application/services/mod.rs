mod boundary_detector;
mod classifier;
mod intake_service;
mod metadata;
mod packet_grouper;

pub use boundary_detector::BoundaryDetector;
pub use classifier::classify_page_type;
pub use intake_service::{IntakeError, IntakeService};
pub use metadata::{
    extract_student_id, extract_student_id_from_filename, extract_student_name, format_date_us,
    is_plausible_name, normalize_date,
};
pub use packet_grouper::{GroupedPacket, PacketGrouper};
