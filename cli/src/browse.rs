use anyhow::Result;
use clap::Args;
use larder_core::routes::LIST_PATH;
use larder_core::{ListEvent, ListSession, ListSnapshot, Location, RecipeStore, Settings};
use std::collections::BTreeSet;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::list::{render_list, ListArgs};
use crate::show::render_recipe;

const HELP: &str = "\
Commands:
  s <text>   search (empty to clear)
  t <tag>    toggle a tag filter
  c          clear tag filters
  n / p      next / previous page
  g <n>      go to page n
  o <id>     open a recipe
  q          quit";

#[derive(Args, Debug, Default)]
pub struct BrowseArgs {
    #[command(flatten)]
    pub list: ListArgs,
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Event(ListEvent),
    Open(String),
    Help,
    Quit,
}

fn parse_command(line: &str, current: &ListSnapshot) -> Command {
    let line = line.trim_end();
    let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    match verb {
        "s" => Command::Event(ListEvent::SearchInput(rest.to_string())),
        "t" if !rest.is_empty() => Command::Event(ListEvent::ToggleTag(rest.to_string())),
        "c" => Command::Event(ListEvent::SetTags(BTreeSet::new())),
        "n" => Command::Event(ListEvent::SetPage(current.page_index + 1)),
        "p" => Command::Event(ListEvent::SetPage(current.page_index.saturating_sub(1))),
        "g" => match rest.parse::<usize>() {
            Ok(n) if n > 0 => Command::Event(ListEvent::SetPage(n - 1)),
            _ => Command::Help,
        },
        "o" if !rest.is_empty() => Command::Open(rest.to_string()),
        "q" => Command::Quit,
        _ => Command::Help,
    }
}

pub async fn browse(store: &RecipeStore, settings: &Settings, args: &BrowseArgs) -> Result<()> {
    let page_size = args
        .list
        .page_size
        .filter(|&n| n > 0)
        .unwrap_or(settings.page_size);
    let initial = Location::new(LIST_PATH, args.list.filter().to_params());

    let session = ListSession::spawn(store.all(), &initial, page_size, settings.search_debounce);
    let mut snapshots = session.snapshots();
    let mut locations = session.locations();

    print!("{}", render_list(&session.snapshot()));
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_command(&line, &session.snapshot()) {
                    Command::Event(event) => session.send(event).await?,
                    Command::Open(id) => match store.get(&id) {
                        Some(recipe) => print!("{}", render_recipe(&recipe)),
                        None => println!("No recipe with id {id}"),
                    },
                    Command::Help => println!("{HELP}"),
                    Command::Quit => break,
                }
            }
            Ok(()) = snapshots.changed() => {
                let snapshot = snapshots.borrow_and_update().clone();
                print!("{}", render_list(&snapshot));
            }
            Ok(()) = locations.changed() => {
                if let Some(update) = locations.borrow_and_update().clone() {
                    println!("-> {}", update.location);
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on_page(page_index: usize) -> ListSnapshot {
        ListSnapshot {
            page_index,
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_commands() {
        let snapshot = on_page(2);
        assert_eq!(
            parse_command("s pasta bake", &snapshot),
            Command::Event(ListEvent::SearchInput("pasta bake".to_string()))
        );
        assert_eq!(
            parse_command("s", &snapshot),
            Command::Event(ListEvent::SearchInput(String::new()))
        );
        assert_eq!(
            parse_command("t vegan", &snapshot),
            Command::Event(ListEvent::ToggleTag("vegan".to_string()))
        );
        assert_eq!(parse_command("n", &snapshot), Command::Event(ListEvent::SetPage(3)));
        assert_eq!(parse_command("p", &snapshot), Command::Event(ListEvent::SetPage(1)));
        assert_eq!(parse_command("g 1", &snapshot), Command::Event(ListEvent::SetPage(0)));
        assert_eq!(parse_command("o abc", &snapshot), Command::Open("abc".to_string()));
        assert_eq!(parse_command("q", &snapshot), Command::Quit);
    }

    #[test]
    fn test_bad_commands_show_help() {
        let snapshot = on_page(0);
        for line in ["", "t", "g 0", "g x", "o", "zzz"] {
            assert_eq!(parse_command(line, &snapshot), Command::Help, "{line:?}");
        }
        assert_eq!(parse_command("p", &snapshot), Command::Event(ListEvent::SetPage(0)));
    }
}
