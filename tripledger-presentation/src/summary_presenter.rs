use crate::text_table::{Alignment, TextTableBuilder};
use std::borrow::Cow;
use tripledger_application::{
    EntryIssue, EntryRef, IssueKind, ParticipantBalance, ParticipantDirectory, TripSummary,
};
use tripledger_domain::{EntryWarning, Money, ParticipantId, RejectionReason, Transfer};
use tripledger_i18n as i18n;

pub struct SummaryPresenter;

pub struct SummaryView {
    pub balance_table: String,
    /// `None` once everyone is settled.
    pub transfer_table: Option<String>,
    pub warnings: Vec<String>,
}

impl SummaryView {
    /// All parts joined for terminal output.
    pub fn to_text(&self) -> String {
        let mut text = format!("{}\n{}", i18n::BALANCES_TITLE, self.balance_table);
        text.push('\n');
        match &self.transfer_table {
            Some(table) => {
                text.push_str(i18n::TRANSFERS_TITLE);
                text.push('\n');
                text.push_str(table);
            }
            None => {
                text.push_str(i18n::ALL_SETTLED);
                text.push('\n');
            }
        }
        for warning in &self.warnings {
            text.push('\n');
            text.push_str(warning);
        }
        if !self.warnings.is_empty() {
            text.push('\n');
        }
        text
    }
}

impl SummaryPresenter {
    pub fn render(summary: &TripSummary, directory: &dyn ParticipantDirectory) -> SummaryView {
        Self::render_with_currency(summary, directory, None)
    }

    /// Like `render`, with `currency` appended to the amount headers.
    pub fn render_with_currency(
        summary: &TripSummary,
        directory: &dyn ParticipantDirectory,
        currency: Option<&str>,
    ) -> SummaryView {
        let transfer_table = (!summary.transfers.is_empty())
            .then(|| Self::build_transfer_table(&summary.transfers, directory, currency));

        SummaryView {
            balance_table: Self::build_balance_table(&summary.balances, directory, currency),
            transfer_table,
            warnings: summary.issues.iter().map(format_issue).collect(),
        }
    }

    pub fn build_balance_table(
        balances: &[ParticipantBalance],
        directory: &dyn ParticipantDirectory,
        currency: Option<&str>,
    ) -> String {
        let headers = [
            Cow::Borrowed(i18n::FAMILY),
            with_currency(i18n::BALANCE, currency),
        ];
        let mut builder = TextTableBuilder::new()
            .alignments(&[Alignment::Left, Alignment::Right])
            .headers(&headers);

        for entry in balances {
            builder = builder.row([
                format_participant_label(&entry.id, directory),
                Cow::Owned(format_signed(entry.balance)),
            ]);
        }

        builder.build()
    }

    pub fn build_transfer_table(
        transfers: &[Transfer],
        directory: &dyn ParticipantDirectory,
        currency: Option<&str>,
    ) -> String {
        let headers = [
            Cow::Borrowed(i18n::FROM),
            Cow::Borrowed(i18n::TO),
            with_currency(i18n::AMOUNT, currency),
        ];
        let mut builder = TextTableBuilder::new()
            .alignments(&[Alignment::Left, Alignment::Left, Alignment::Right])
            .headers(&headers);

        for transfer in transfers {
            builder = builder.row([
                format_participant_label(&transfer.from, directory),
                format_participant_label(&transfer.to, directory),
                Cow::Owned(format_amount(transfer.amount)),
            ]);
        }

        builder.build()
    }
}

fn with_currency(header: &'static str, currency: Option<&str>) -> Cow<'static, str> {
    match currency {
        Some(code) => Cow::Owned(format!("{header} ({code})")),
        None => Cow::Borrowed(header),
    }
}

fn format_participant_label<'a>(
    id: &'a ParticipantId,
    directory: &'a dyn ParticipantDirectory,
) -> Cow<'a, str> {
    match directory.display_name(id) {
        Some(name) => Cow::Borrowed(name),
        None => Cow::Borrowed(id.as_str()),
    }
}

fn format_amount(amount: Money) -> String {
    format!("{:.2}", amount.round_to_cents().as_decimal())
}

fn format_signed(amount: Money) -> String {
    let rounded = amount.round_to_cents();
    if rounded.is_positive() {
        format!("+{}", format_amount(rounded))
    } else if rounded.is_zero() {
        // Avoids "-0.00" for tiny negative remainders.
        format_amount(Money::ZERO)
    } else {
        format_amount(rounded)
    }
}

fn format_issue(issue: &EntryIssue) -> String {
    let location = match issue.entry {
        EntryRef::Line(line) => i18n::EntryLocation::Line(line),
        EntryRef::Stored(id) => i18n::EntryLocation::Stored(id.0),
    };
    match &issue.kind {
        IssueKind::Rejected(reason) => {
            i18n::skipped_entry(location, format_rejection(reason)).to_string()
        }
        IssueKind::Warning(warning) => {
            i18n::flagged_entry(location, format_warning(warning)).to_string()
        }
    }
}

fn format_rejection(reason: &RejectionReason) -> String {
    match reason {
        RejectionReason::NonPositiveAmount(amount) => i18n::non_positive_amount(amount),
        RejectionReason::AmountOutOfRange(amount) => i18n::amount_out_of_range(amount),
        RejectionReason::SelfSettlement(id) => i18n::self_settlement(id),
        RejectionReason::EmptyParticipantId => i18n::EMPTY_PARTICIPANT_ID.to_string(),
        RejectionReason::EmptyInvolvedSet => i18n::EMPTY_INVOLVED_SET.to_string(),
    }
}

fn format_warning(warning: &EntryWarning) -> String {
    match warning {
        EntryWarning::PayerNotInvolved(id) => i18n::payer_not_involved(id),
        EntryWarning::UnknownParticipant(id) => i18n::unknown_participant(id),
    }
}
