//! The contract content region: the fixed agreement text with the submitted
//! values filled in.

use contract_core::{ExportJob, Field};
use contract_engine::ContractDocument;

const UNQUOTED: &str = "To be quoted";

pub fn contract_document(company: &str, job: &ExportJob) -> ContractDocument {
    let client = &job.snapshot;
    let cost = |field: Field| {
        let value = client.get(field).trim();
        if value.is_empty() {
            UNQUOTED.to_string()
        } else {
            value.to_string()
        }
    };

    ContractDocument::new(format!("{company} Service Agreement"))
        .field("Date", &job.date_label)
        .field("Contract Reference", &job.reference)
        .heading("Client Details")
        .field(Field::ClientName.label(), &client.client_name)
        .field(Field::ClientEmail.label(), &client.client_email)
        .field(Field::ClientContact.label(), &client.client_contact)
        .heading("Fees")
        .field(Field::SetupCost.label(), cost(Field::SetupCost))
        .field(Field::MonthlyCost.label(), cost(Field::MonthlyCost))
        .heading("1. Services")
        .paragraph(format!(
            "{company} provides the connectivity and support services described in this \
             agreement to the client named above from the date of signature."
        ))
        .heading("2. Payment")
        .paragraph(
            "The setup cost is payable before installation. The monthly cost is billed in \
             advance on the first day of each month.",
        )
        .heading("3. Term and Cancellation")
        .paragraph(
            "This agreement runs month to month. Either party may cancel with one calendar \
             month's written notice.",
        )
        .page_break()
        .heading("Signatures")
        .paragraph("Signed by the parties on the dates shown below.")
        .signature(format!("Client: {}", client.client_name))
        .signature(format!("For and on behalf of {company}"))
}
