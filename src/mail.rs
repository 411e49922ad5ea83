//! Inbox folders and mail entries
//!
//! The inbox content is fixture data; only the message banner comes from the
//! API.

pub struct MailFolder {
    pub label: &'static str,
    pub id: &'static str,
}

pub const FOLDERS: &[MailFolder] = &[
    MailFolder { label: "Labs/Diag - 8", id: "labs" },
    MailFolder { label: "Prescriptions - 6", id: "prescriptions" },
    MailFolder { label: "Messages - 5", id: "messages" },
    MailFolder { label: "Images - 5", id: "images" },
    MailFolder { label: "Documents - 0", id: "documents" },
    MailFolder { label: "Patient Portal - 5", id: "portal" },
    MailFolder { label: "Scheduled", id: "scheduled" },
    MailFolder { label: "Unmatched - 0", id: "unmatched" },
    MailFolder { label: "Sent Items - 0", id: "sentItems" },
];

/// Folder highlighted when the view mounts ("messages")
pub const DEFAULT_FOLDER: usize = 2;

pub struct MailEntry {
    pub mrn: &'static str,
    pub last_name: &'static str,
    pub first_name: &'static str,
    pub dob: &'static str,
    pub subject: &'static str,
    pub date_received: &'static str,
    pub from_user: &'static str,
}

pub const COLUMN_TITLES: [&str; 7] = [
    "MRN",
    "Last Name",
    "First Name",
    "DOB",
    "Subject",
    "Date Received",
    "From User",
];

pub const SAMPLE_ENTRIES: &[MailEntry] = &[
    MailEntry {
        mrn: "123456",
        last_name: "Smith",
        first_name: "John",
        dob: "01/01/1980",
        subject: "Lab Results",
        date_received: "12/18/2024",
        from_user: "Dr. Doe",
    },
    MailEntry {
        mrn: "234567",
        last_name: "Doe",
        first_name: "Jane",
        dob: "02/02/1985",
        subject: "Prescription",
        date_received: "12/17/2024",
        from_user: "Nurse Joy",
    },
    MailEntry {
        mrn: "345678",
        last_name: "Brown",
        first_name: "Charlie",
        dob: "03/03/1990",
        subject: "Message",
        date_received: "12/16/2024",
        from_user: "Dr. Smith",
    },
    MailEntry {
        mrn: "456789",
        last_name: "Johnson",
        first_name: "Emily",
        dob: "04/04/1995",
        subject: "Image Upload",
        date_received: "12/15/2024",
        from_user: "Dr. White",
    },
    MailEntry {
        mrn: "567890",
        last_name: "Lee",
        first_name: "Chris",
        dob: "05/05/2000",
        subject: "Document",
        date_received: "12/14/2024",
        from_user: "Receptionist",
    },
];

impl MailEntry {
    /// Cell values in display column order.
    pub fn columns(&self) -> [&'static str; 7] {
        [
            self.mrn,
            self.last_name,
            self.first_name,
            self.dob,
            self.subject,
            self.date_received,
            self.from_user,
        ]
    }
}
