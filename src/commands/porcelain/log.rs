use crate::areas::refs::RefResolver;
use crate::areas::repository::Repository;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use colored::Colorize;
use std::io::Write;

impl Repository {
    pub fn log(&self, revision: Option<&str>) -> anyhow::Result<()> {
        let start = match revision {
            Some(revision) => self.resolve_revision(revision)?,
            None => match self.refs().resolve_current_tip()? {
                Some(tip) => tip,
                None => anyhow::bail!("your current branch does not have any commits yet"),
            },
        };

        for (index, step) in RevList::new(self.database(), start).enumerate() {
            let (commit_oid, commit) = step?;

            if index > 0 {
                writeln!(self.writer())?;
            }
            self.show_commit_medium(&commit_oid, &commit)?;
        }

        Ok(())
    }

    fn show_commit_medium(&self, commit_oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        writeln!(
            self.writer(),
            "{}",
            format!("commit {commit_oid}").yellow()
        )?;

        let (identity, date) = split_author(commit.author());
        writeln!(self.writer(), "Author: {identity}")?;
        if let Some(date) = date {
            writeln!(self.writer(), "Date:   {date}")?;
        }

        writeln!(self.writer())?;
        for message_line in String::from_utf8_lossy(commit.message()).lines() {
            writeln!(self.writer(), "    {message_line}")?;
        }

        Ok(())
    }
}

/// Split `name <email> <seconds> <offset>` into the identity and a readable date
///
/// Author strings that do not end in a timestamp are shown verbatim.
fn split_author(author: &str) -> (&str, Option<String>) {
    let mut parts = author.rsplitn(3, ' ');
    let (Some(offset), Some(seconds), Some(identity)) = (parts.next(), parts.next(), parts.next())
    else {
        return (author, None);
    };

    let offset = parse_offset(offset);
    let timestamp = seconds
        .parse::<i64>()
        .ok()
        .and_then(|seconds| chrono::DateTime::from_timestamp(seconds, 0));

    match (offset, timestamp) {
        (Some(offset), Some(timestamp)) => (
            identity,
            Some(
                timestamp
                    .with_timezone(&offset)
                    .format("%a %b %-d %H:%M:%S %Y %z")
                    .to_string(),
            ),
        ),
        _ => (author, None),
    }
}

/// `±hhmm`
fn parse_offset(offset: &str) -> Option<chrono::FixedOffset> {
    let (sign, digits) = match offset.split_at_checked(1)? {
        ("+", digits) => (1, digits),
        ("-", digits) => (-1, digits),
        _ => return None,
    };
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let hours = digits[..2].parse::<i32>().ok()?;
    let minutes = digits[2..].parse::<i32>().ok()?;
    chrono::FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
