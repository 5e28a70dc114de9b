//! Receipt formatter: turns a finalized visit into a fixed-layout PDF.
//!
//! Layout is a single A4 page: practice header, patient line, optional
//! next-appointment highlight, optional diagnosis / treatment / prescription
//! blocks, and an invoice table when the visit billed anything. The final
//! row is `Balance Due` when the due is positive, otherwise a `Paid` status
//! row. The branch is on the sign of the due, never its magnitude.

use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::io::BufWriter;
use thiserror::Error;

use crate::config::ClinicProfile;
use crate::ledger::BillTotals;
use crate::models::{format_amount, BillLineItem, Gender, VisitNotes};

#[derive(Error, Debug)]
pub enum ReceiptError {
    #[error("PDF rendering failed: {0}")]
    Pdf(String),
}

/// Everything the formatter needs about a finalized visit. Immutable input;
/// rendering keeps no state between calls.
#[derive(Debug, Clone)]
pub struct Receipt {
    pub patient_name: String,
    pub age: u32,
    pub gender: Gender,
    pub visit_date: String,
    /// Date string, or a sentinel meaning no follow-up is booked.
    pub next_appointment: String,
    pub notes: VisitNotes,
    pub line_items: Vec<BillLineItem>,
    pub totals: BillTotals,
    pub amount_paid: f64,
}

impl Receipt {
    /// Suggested download name for the rendered document.
    pub fn file_name(&self) -> String {
        format!("{}_Rx.pdf", self.patient_name)
    }

    fn next_appointment_is_set(&self) -> bool {
        !matches!(self.next_appointment.trim(), "" | "Not Required" | "TBD")
    }

    /// The invoice table as (label, value) rows, in print order. Empty when
    /// the visit billed no line items. The last row carries the
    /// settled-or-due branch.
    pub fn invoice_rows(&self) -> Vec<(String, String)> {
        if self.line_items.is_empty() {
            return Vec::new();
        }
        let mut rows: Vec<(String, String)> = self
            .line_items
            .iter()
            .map(|item| (item.name.clone(), format_amount(item.price)))
            .collect();
        rows.push(("Total Amount".into(), format_amount(self.totals.grand_total)));
        rows.push(("Paid Now".into(), format_amount(self.amount_paid)));
        if self.totals.is_settled() {
            rows.push(("Status".into(), "Paid".into()));
        } else {
            rows.push(("Balance Due".into(), format_amount(self.totals.new_due)));
        }
        rows
    }

    /// Render the receipt to PDF bytes.
    pub fn render_pdf(&self, profile: &ClinicProfile) -> Result<Vec<u8>, ReceiptError> {
        let title = format!("{} - Receipt", profile.clinic_name);
        let (doc, page1, layer1) = PdfDocument::new(&title, Mm(210.0), Mm(297.0), "Layer 1");
        let layer = doc.get_page(page1).get_layer(layer1);
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ReceiptError::Pdf(format!("font error: {e}")))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ReceiptError::Pdf(format!("font error: {e}")))?;

        let mut y = Mm(280.0);

        // Practice header, right-hand block.
        layer.use_text(&profile.doctor_name, 14.0, Mm(120.0), y, &bold);
        y -= Mm(6.0);
        layer.use_text(&profile.qualification, 10.0, Mm(120.0), y, &font);
        y -= Mm(5.0);
        layer.use_text(&profile.phone, 10.0, Mm(120.0), y, &font);
        y -= Mm(10.0);

        // Patient line.
        layer.use_text(
            format!(
                "Patient: {}  ({}/{})",
                self.patient_name, self.age, self.gender
            ),
            12.0,
            Mm(20.0),
            y,
            &bold,
        );
        y -= Mm(6.0);
        layer.use_text(format!("Date: {}", self.visit_date), 11.0, Mm(20.0), y, &font);
        y -= Mm(6.0);
        if self.next_appointment_is_set() {
            layer.use_text(
                format!("Next Appointment: {}", self.next_appointment),
                11.0,
                Mm(20.0),
                y,
                &bold,
            );
            y -= Mm(6.0);
        }
        y -= Mm(4.0);

        // Clinical blocks, each omitted entirely when empty.
        for (heading, body) in [
            ("Diagnosis:", &self.notes.diagnosis),
            ("Treatment Done / Advised:", &self.notes.advice),
            ("Prescription (Rx):", &self.notes.prescription),
        ] {
            if body.trim().is_empty() {
                continue;
            }
            layer.use_text(heading, 11.0, Mm(20.0), y, &bold);
            y -= Mm(6.0);
            for para in body.lines() {
                for line in wrap_text(para, 80) {
                    layer.use_text(&line, 11.0, Mm(25.0), y, &font);
                    y -= Mm(5.0);
                }
            }
            y -= Mm(3.0);
        }

        // Invoice table.
        let rows = self.invoice_rows();
        if !rows.is_empty() {
            y -= Mm(4.0);
            layer.use_text("INVOICE", 12.0, Mm(95.0), y, &bold);
            y -= Mm(8.0);
            let total_rows = rows.len();
            for (i, (label, value)) in rows.iter().enumerate() {
                // Summary rows (last three) print bold.
                let row_font = if i + 3 >= total_rows { &bold } else { &font };
                layer.use_text(label, 11.0, Mm(20.0), y, row_font);
                layer.use_text(
                    format!("{} {}", profile.currency_symbol, value),
                    11.0,
                    Mm(150.0),
                    y,
                    row_font,
                );
                y -= Mm(7.0);
            }
        }

        // Footer.
        layer.use_text(&profile.address, 9.0, Mm(20.0), Mm(20.0), &font);
        layer.use_text(&profile.hours, 9.0, Mm(20.0), Mm(15.0), &font);

        let mut buf = BufWriter::new(Vec::new());
        doc.save(&mut buf)
            .map_err(|e| ReceiptError::Pdf(format!("save error: {e}")))?;
        buf.into_inner()
            .map_err(|e| ReceiptError::Pdf(format!("buffer error: {e}")))
    }
}

/// Greedy word wrap to a maximum line width in characters.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
