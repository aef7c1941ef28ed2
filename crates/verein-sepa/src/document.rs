//! pain.008.003.02 document assembly.
//!
//! Assembly is purely a transformation from originator, payment groups, and
//! options to output bytes; writing the file is the caller's business.

use std::io::Write;

use anyhow::{Result, anyhow};
use chrono::NaiveDateTime;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use tracing::warn;

use verein_model::{Member, Originator, PaymentGroup, format_amount};

use crate::validate::format_sepa_date;

const PAIN_NS: &str = "urn:iso:std:iso:20022:tech:xsd:pain.008.003.02";
const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";
const SCHEMA_LOCATION: &str =
    "urn:iso:std:iso:20022:tech:xsd:pain.008.003.02 pain.008.003.02.xsd";

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
const CURRENCY: &str = "EUR";
const END_TO_END_NOT_PROVIDED: &str = "NOTPROVIDED";

/// Output-encoding configuration.
///
/// The byte-order mark only changes the leading bytes of the emitted stream;
/// textual content is identical either way.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentOptions {
    pub with_bom: bool,
}

/// Render the collection document and return its bytes.
pub fn assemble_document(
    originator: &Originator,
    groups: &[PaymentGroup],
    created_at: NaiveDateTime,
    options: &DocumentOptions,
) -> Result<Vec<u8>> {
    if groups.is_empty() {
        return Err(anyhow!("no payment groups to assemble"));
    }
    let transaction_count: usize = groups.iter().map(PaymentGroup::transaction_count).sum();
    let control_sum = format_amount(groups.iter().map(PaymentGroup::control_sum).sum());

    let mut buffer = Vec::new();
    if options.with_bom {
        buffer.extend_from_slice(&UTF8_BOM);
    }
    let mut xml = Writer::new_with_indent(buffer, b' ', 2);
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("Document");
    root.push_attribute(("xmlns", PAIN_NS));
    root.push_attribute(("xmlns:xsi", XSI_NS));
    root.push_attribute(("xsi:schemaLocation", SCHEMA_LOCATION));
    xml.write_event(Event::Start(root))?;
    xml.write_event(Event::Start(BytesStart::new("CstmrDrctDbtInitn")))?;

    xml.write_event(Event::Start(BytesStart::new("GrpHdr")))?;
    write_text_element(&mut xml, "MsgId", &originator.message_id)?;
    write_text_element(&mut xml, "CreDtTm", &format_sepa_date(created_at))?;
    write_text_element(&mut xml, "NbOfTxs", &transaction_count.to_string())?;
    write_text_element(&mut xml, "CtrlSum", &control_sum)?;
    xml.write_event(Event::Start(BytesStart::new("InitgPty")))?;
    write_text_element(&mut xml, "Nm", &originator.creator)?;
    xml.write_event(Event::End(BytesEnd::new("InitgPty")))?;
    xml.write_event(Event::End(BytesEnd::new("GrpHdr")))?;

    for group in groups {
        write_payment_information(&mut xml, originator, group)?;
    }

    xml.write_event(Event::End(BytesEnd::new("CstmrDrctDbtInitn")))?;
    xml.write_event(Event::End(BytesEnd::new("Document")))?;
    Ok(xml.into_inner())
}

/// One `PmtInf` block: group identity, creditor identity, one transaction
/// entry per member.
fn write_payment_information<W: Write>(
    xml: &mut Writer<W>,
    originator: &Originator,
    group: &PaymentGroup,
) -> Result<()> {
    let execution_date = originator.execution_date.format("%Y-%m-%d").to_string();

    xml.write_event(Event::Start(BytesStart::new("PmtInf")))?;
    write_text_element(xml, "PmtInfId", &group.pmt_inf_id)?;
    write_text_element(xml, "PmtMtd", "DD")?;
    write_text_element(xml, "BtchBookg", "true")?;
    write_text_element(xml, "NbOfTxs", &group.transaction_count().to_string())?;
    write_text_element(xml, "CtrlSum", &format_amount(group.control_sum()))?;

    xml.write_event(Event::Start(BytesStart::new("PmtTpInf")))?;
    xml.write_event(Event::Start(BytesStart::new("SvcLvl")))?;
    write_text_element(xml, "Cd", "SEPA")?;
    xml.write_event(Event::End(BytesEnd::new("SvcLvl")))?;
    xml.write_event(Event::Start(BytesStart::new("LclInstrm")))?;
    write_text_element(xml, "Cd", "CORE")?;
    xml.write_event(Event::End(BytesEnd::new("LclInstrm")))?;
    write_text_element(xml, "SeqTp", "RCUR")?;
    xml.write_event(Event::End(BytesEnd::new("PmtTpInf")))?;

    write_text_element(xml, "ReqdColltnDt", &execution_date)?;
    xml.write_event(Event::Start(BytesStart::new("Cdtr")))?;
    write_text_element(xml, "Nm", &originator.creditor)?;
    xml.write_event(Event::End(BytesEnd::new("Cdtr")))?;
    xml.write_event(Event::Start(BytesStart::new("CdtrAcct")))?;
    xml.write_event(Event::Start(BytesStart::new("Id")))?;
    write_text_element(xml, "IBAN", &originator.iban)?;
    xml.write_event(Event::End(BytesEnd::new("Id")))?;
    xml.write_event(Event::End(BytesEnd::new("CdtrAcct")))?;
    xml.write_event(Event::Start(BytesStart::new("CdtrAgt")))?;
    xml.write_event(Event::Start(BytesStart::new("FinInstnId")))?;
    write_text_element(xml, "BIC", &originator.bic)?;
    xml.write_event(Event::End(BytesEnd::new("FinInstnId")))?;
    xml.write_event(Event::End(BytesEnd::new("CdtrAgt")))?;
    write_text_element(xml, "ChrgBr", "SLEV")?;

    xml.write_event(Event::Start(BytesStart::new("CdtrSchmeId")))?;
    xml.write_event(Event::Start(BytesStart::new("Id")))?;
    xml.write_event(Event::Start(BytesStart::new("PrvtId")))?;
    xml.write_event(Event::Start(BytesStart::new("Othr")))?;
    write_text_element(xml, "Id", &originator.creditor_id)?;
    xml.write_event(Event::Start(BytesStart::new("SchmeNm")))?;
    write_text_element(xml, "Prtry", "SEPA")?;
    xml.write_event(Event::End(BytesEnd::new("SchmeNm")))?;
    xml.write_event(Event::End(BytesEnd::new("Othr")))?;
    xml.write_event(Event::End(BytesEnd::new("PrvtId")))?;
    xml.write_event(Event::End(BytesEnd::new("Id")))?;
    xml.write_event(Event::End(BytesEnd::new("CdtrSchmeId")))?;

    for member in &group.members {
        write_transaction(xml, originator, group, member)?;
    }

    xml.write_event(Event::End(BytesEnd::new("PmtInf")))?;
    Ok(())
}

fn write_transaction<W: Write>(
    xml: &mut Writer<W>,
    originator: &Originator,
    group: &PaymentGroup,
    member: &Member,
) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new("DrctDbtTxInf")))?;
    xml.write_event(Event::Start(BytesStart::new("PmtId")))?;
    write_text_element(xml, "EndToEndId", END_TO_END_NOT_PROVIDED)?;
    xml.write_event(Event::End(BytesEnd::new("PmtId")))?;

    let mut amount = BytesStart::new("InstdAmt");
    amount.push_attribute(("Ccy", CURRENCY));
    xml.write_event(Event::Start(amount))?;
    xml.write_event(Event::Text(BytesText::new(&format_amount(group.amount))))?;
    xml.write_event(Event::End(BytesEnd::new("InstdAmt")))?;

    xml.write_event(Event::Start(BytesStart::new("DrctDbtTx")))?;
    xml.write_event(Event::Start(BytesStart::new("MndtRltdInf")))?;
    write_text_element(xml, "MndtId", &member.membership_number.to_string())?;
    match member.account_holder.mandate_signed {
        Some(signed) => {
            write_text_element(xml, "DtOfSgntr", &signed.format("%Y-%m-%d").to_string())?;
        }
        None => {
            warn!(
                membership_number = member.membership_number,
                "member has no mandate signature date, omitting DtOfSgntr"
            );
        }
    }
    write_text_element(
        xml,
        "AmdmntInd",
        if member.account_holder.mandate_changed {
            "true"
        } else {
            "false"
        },
    )?;
    xml.write_event(Event::End(BytesEnd::new("MndtRltdInf")))?;
    xml.write_event(Event::End(BytesEnd::new("DrctDbtTx")))?;

    xml.write_event(Event::Start(BytesStart::new("DbtrAgt")))?;
    xml.write_event(Event::Start(BytesStart::new("FinInstnId")))?;
    write_text_element(xml, "BIC", &member.account_holder.bic)?;
    xml.write_event(Event::End(BytesEnd::new("FinInstnId")))?;
    xml.write_event(Event::End(BytesEnd::new("DbtrAgt")))?;

    xml.write_event(Event::Start(BytesStart::new("Dbtr")))?;
    write_text_element(xml, "Nm", &member.account_holder.full_name())?;
    xml.write_event(Event::End(BytesEnd::new("Dbtr")))?;
    xml.write_event(Event::Start(BytesStart::new("DbtrAcct")))?;
    xml.write_event(Event::Start(BytesStart::new("Id")))?;
    write_text_element(xml, "IBAN", &member.account_holder.iban)?;
    xml.write_event(Event::End(BytesEnd::new("Id")))?;
    xml.write_event(Event::End(BytesEnd::new("DbtrAcct")))?;

    xml.write_event(Event::Start(BytesStart::new("RmtInf")))?;
    write_text_element(xml, "Ustrd", &originator.purpose)?;
    xml.write_event(Event::End(BytesEnd::new("RmtInf")))?;
    xml.write_event(Event::End(BytesEnd::new("DrctDbtTxInf")))?;
    Ok(())
}

fn write_text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
