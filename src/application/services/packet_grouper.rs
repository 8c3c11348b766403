use crate::domain::{DocumentTypeLabel, PageText};

use super::classifier::classify_page_type;
use super::metadata::{extract_student_id, extract_student_id_from_filename, extract_student_name};

/// Pages accumulated for one student across a multi-type packet, in no
/// guaranteed order of appearance.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedPacket {
    pub student_id: String,
    pub student_name: Option<String>,
    pub type_labels: Vec<DocumentTypeLabel>,
    pub pages: Vec<usize>,
}

/// Multi-header grouping detection: pages sharing a student identifier are
/// accumulated into one packet regardless of adjacency. Pages with no
/// extractable identifier (from the page or the filename hint) are skipped.
pub struct PacketGrouper;

impl PacketGrouper {
    pub fn group(pages: &[PageText], filename: &str) -> Vec<GroupedPacket> {
        let filename_id = extract_student_id_from_filename(filename);
        let mut packets: Vec<GroupedPacket> = Vec::new();

        for page in pages {
            let student_id = match extract_student_id(&page.normalized)
                .or_else(|| filename_id.clone())
            {
                Some(id) => id,
                None => {
                    tracing::debug!(page = page.index + 1, "No student identifier, skipping page");
                    continue;
                }
            };

            let name = extract_student_name(&page.normalized);
            let label = classify_page_type(&page.normalized);

            let position = match packets.iter().position(|p| p.student_id == student_id) {
                Some(position) => position,
                None => {
                    packets.push(GroupedPacket {
                        student_id: student_id.clone(),
                        student_name: None,
                        type_labels: Vec::new(),
                        pages: Vec::new(),
                    });
                    packets.len() - 1
                }
            };
            let packet = &mut packets[position];

            packet.pages.push(page.index);
            if packet.student_name.is_none() {
                packet.student_name = name;
            }
            if let Some(label) = label {
                if !packet.type_labels.contains(&label) {
                    packet.type_labels.push(label);
                }
            }
        }

        for packet in &mut packets {
            packet.pages.sort_unstable();
            tracing::debug!(
                student_id = %packet.student_id,
                pages = packet.pages.len(),
                types = packet.type_labels.len(),
                "Grouped packet"
            );
        }

        packets
    }
}
