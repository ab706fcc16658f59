use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{
    info,
    navigation::{
        BackOutcome, ContentState, Detail, HydrationOutcome, MemoryHistory, MoviesFilters,
        NavigationController, PageBounds, PageKey, RegistrationId, SortOrder, View, decode_location,
    },
    types::PersonKind,
    warning,
};

use super::{
    common::{catalog_source, describe_state, load_nav_items},
    list::{parse_filter, parse_sort_key},
    route::location_of,
    view::Renderer,
};

const HELP: &str = "\
go <url>            drill down into a catalog URL
top <nav-id>        jump to a navigation item (clears the back trail)
nav                 list navigation items
open <n>            open the n-th movie of the current page
profile <type> <n>  open an actress or actor profile by name
filter <type=value> show movies matching a filter
search <term>       search the current movies list (empty clears)
sort <key> [asc|desc]
first | prev | next | last
back                go back
url <url>           simulate typing a URL into the browser
pop                 re-read the browser URL
forward             simulate the browser forward button
state               print the current state and back trail
help | quit";

enum Step {
    Redraw,
    Stay,
    Quit,
}

/// Interactive session over the same navigation rules as the web UI.
pub async fn browse(start: Option<String>) {
    let source = catalog_source();
    let nav_items = load_nav_items(&source).await;
    let start = start.map(|url| location_of(&url).href());
    let browser = MemoryHistory::new(start.as_deref().unwrap_or("/movies"));

    let mut session = Session {
        nav: NavigationController::new(browser, nav_items),
        renderer: Renderer::new(source),
        pagination: None,
    };
    info!("Type help for commands.");
    session.redraw().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", format!("{}>", session.nav.current().title()).bright_blue());
        let _ = std::io::Write::flush(&mut std::io::stdout());

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warning!("Cannot read input. Err: {}", e);
                break;
            }
        };

        match session.run(line.trim()).await {
            Step::Redraw => session.redraw().await,
            Step::Stay => {}
            Step::Quit => break,
        }
    }
}

struct Session {
    nav: NavigationController<MemoryHistory>,
    renderer: Renderer,
    pagination: Option<RegistrationId>,
}

impl Session {
    async fn run(&mut self, line: &str) -> Step {
        let (command, arg) = match line.split_once(' ') {
            Some((c, a)) => (c, a.trim()),
            None => (line, ""),
        };

        if let Some(key) = PageKey::parse(command) {
            if self.nav.page(key).is_none() {
                warning!("Nowhere to go.");
                return Step::Stay;
            }
            return Step::Redraw;
        }

        match command {
            "" => Step::Stay,
            "quit" | "exit" | "q" => Step::Quit,
            "help" | "?" => {
                println!("{}", HELP);
                Step::Stay
            }
            "state" => {
                self.print_state();
                Step::Stay
            }
            "nav" => {
                for item in self.nav.nav_items() {
                    let marker = if self.nav.active_nav_item() == Some(item.id.as_str()) {
                        "*"
                    } else {
                        " "
                    };
                    println!("{} {:<16} {}", marker, item.id, item.label);
                }
                Step::Stay
            }
            "go" => match decode_location(&location_of(arg)) {
                Some(state) => {
                    self.nav.drill_down(state);
                    Step::Redraw
                }
                None => {
                    warning!("{} is not a catalog URL.", arg);
                    Step::Stay
                }
            },
            "top" => {
                if self.nav.select_nav_item(arg) {
                    Step::Redraw
                } else {
                    Step::Stay
                }
            }
            "back" => match self.nav.go_back() {
                BackOutcome::Restored => Step::Redraw,
                BackOutcome::Native if self.nav.handle_pop_state() => Step::Redraw,
                BackOutcome::Native => Step::Stay,
                BackOutcome::Unavailable => {
                    warning!("Nowhere to go back to.");
                    Step::Stay
                }
            },
            "url" => {
                self.nav.browser_mut().push(&location_of(arg).href());
                if self.nav.handle_pop_state() {
                    Step::Redraw
                } else {
                    Step::Stay
                }
            }
            "pop" => {
                if self.nav.handle_pop_state() {
                    Step::Redraw
                } else {
                    Step::Stay
                }
            }
            "forward" => {
                if self.nav.browser_mut().forward() && self.nav.handle_pop_state() {
                    return Step::Redraw;
                }
                warning!("Nothing to go forward to.");
                Step::Stay
            }
            "open" => self.open_movie(arg).await,
            "profile" => {
                let Some((kind, name)) = arg.split_once(' ') else {
                    warning!("Usage: profile <actress|actor> <name>");
                    return Step::Stay;
                };
                let Some(kind) = PersonKind::parse(kind) else {
                    warning!("Unknown profile type {}", kind);
                    return Step::Stay;
                };
                self.nav.drill_down(ContentState::profile(kind, name.trim()));
                Step::Redraw
            }
            "filter" => match parse_filter(arg) {
                Ok(filter) => {
                    self.nav
                        .drill_down(ContentState::new(View::FilteredMovies(filter)));
                    Step::Redraw
                }
                Err(e) => {
                    warning!("{}", e);
                    Step::Stay
                }
            },
            "search" => self.change_filters(|filters| {
                filters.search = arg.to_string();
                filters.current_page = 1;
            }),
            "sort" => {
                let mut parts = arg.split_whitespace();
                let key = match parts.next().map(parse_sort_key) {
                    Some(Ok(key)) => key,
                    Some(Err(e)) => {
                        warning!("{}", e);
                        return Step::Stay;
                    }
                    None => {
                        warning!("Usage: sort <date|title|code> [asc|desc]");
                        return Step::Stay;
                    }
                };
                let order = match parts.next() {
                    Some("asc") => Some(SortOrder::Asc),
                    Some("desc") => Some(SortOrder::Desc),
                    _ => None,
                };
                self.change_filters(|filters| {
                    filters.sort_by = key;
                    if let Some(order) = order {
                        filters.sort_order = order;
                    }
                    filters.current_page = 1;
                })
            }
            other => {
                warning!("Unknown command {}. Type help for commands.", other);
                Step::Stay
            }
        }
    }

    fn change_filters<F>(&mut self, change: F) -> Step
    where
        F: FnOnce(&mut MoviesFilters),
    {
        let mut filters = self.nav.current().movies_filters().cloned().unwrap_or_default();
        change(&mut filters);
        if !self.nav.update_movies_filters(filters) {
            warning!("{} has no movies list to change.", self.nav.current().title());
            return Step::Stay;
        }
        Step::Redraw
    }

    async fn open_movie(&mut self, arg: &str) -> Step {
        let Ok(index) = arg.parse::<usize>() else {
            warning!("Usage: open <n>");
            return Step::Stay;
        };
        let page = match self.renderer.movie_page(self.nav.current()).await {
            Ok(Some(page)) => page,
            Ok(None) => {
                warning!("{} is not a movies list.", self.nav.current().title());
                return Step::Stay;
            }
            Err(e) => {
                warning!("Failed to load movies. Err: {}", e);
                return Step::Stay;
            }
        };
        let Some(movie) = index.checked_sub(1).and_then(|i| page.items.get(i)) else {
            warning!("No movie #{} on this page.", index);
            return Step::Stay;
        };
        let view = View::MovieDetail(Detail::Resolved(movie.clone()));
        self.nav.drill_down(ContentState::new(view));
        Step::Redraw
    }

    async fn redraw(&mut self) {
        if let Some(HydrationOutcome::FellBack(_)) =
            self.nav.hydrate(self.renderer.source()).await
        {
            warning!("Entity not found, showing {}", self.nav.current().title());
        }

        info!("{}", describe_state(self.nav.current()));
        let total_pages = match self.renderer.render(self.nav.current()).await {
            Ok(total_pages) => total_pages,
            Err(e) => {
                warning!("Failed to load {}. Err: {}", self.nav.current().title(), e);
                None
            }
        };

        if let Some(id) = self.pagination.take() {
            self.nav.pagination_mut().unregister(id);
        }
        if let Some(total_pages) = total_pages {
            let id = self
                .nav
                .pagination_mut()
                .register(PageBounds::new(total_pages));
            self.pagination = Some(id);
        }
    }

    fn print_state(&self) {
        info!("{}", describe_state(self.nav.current()));
        if let Some(active) = self.nav.active_nav_item() {
            println!("  nav: {}", active);
        }
        println!("  url: {}", self.nav.browser().current_url());
        for (depth, state) in self.nav.history().entries().iter().rev().enumerate() {
            println!("  {:>2}. {}", depth + 1, describe_state(state));
        }
    }
}
