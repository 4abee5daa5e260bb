use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::{
    models::{Movie, PgRating},
    ui::{FormErrors, GENERAL, MovieForm},
    validation::TITLE_MAX_CHARS,
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";
const DATASTAR_CDN: &str =
    "https://cdn.jsdelivr.net/npm/@sudodevnull/datastar@0.19.9/dist/datastar.js";

const INPUT_CLASS: &str = "mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500";
const PRIMARY_BUTTON: &str =
    "rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700";

/// List page shell. The movie list itself is fetched by Datastar so the
/// loading state shows until the fragment arrives. `filter` is passed to the
/// fragment as given, so a value that is not a rating id lists nothing.
pub fn movies_page(ratings: &[PgRating], filter: Option<&str>) -> String {
    let selected = filter.and_then(|raw| raw.parse::<i32>().ok());
    let url = match filter {
        Some(raw) => format!("/ui/movies/list?pg_rating_id={}", urlencoding::encode(raw)),
        None => "/ui/movies/list".to_string(),
    };

    page(
        "Movie Collection",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-4xl mx-auto px-6 py-10" {
                    div class="flex items-start justify-between gap-6" {
                        div {
                            h1 class="text-3xl font-bold text-gray-900" { "Movie Collection" }
                            p class="mt-2 text-gray-600" { "Discover and manage your favorite movies" }
                        }
                        a class=(PRIMARY_BUTTON) href="/ui/movies/create" { "Add Movie" }
                    }

                    form class="mt-8 flex items-end gap-3" method="get" action="/ui/movies" {
                        div class="flex-1" {
                            label class="block text-sm font-medium text-gray-700" for="pg_rating_id" { "Filter by PG Rating:" }
                            select class=(INPUT_CLASS) id="pg_rating_id" name="pg_rating_id" {
                                option value="" selected[filter.is_none()] { "All Movies" }
                                @for rating in ratings {
                                    option value=(rating.id) selected[selected == Some(rating.id)] {
                                        (rating.code) " - " (rating.name)
                                    }
                                }
                            }
                        }
                        button class=(PRIMARY_BUTTON) type="submit" { "Filter" }
                    }

                    div id="content" class="mt-8" data-init=(PreEscaped(format!("@get('{}')", url))) {
                        div class="bg-white shadow rounded-lg p-8 text-center" {
                            div class="mx-auto h-12 w-12 rounded-full border-4 border-blue-200 border-t-blue-600 animate-spin" {}
                            p class="mt-6 text-gray-600" { "Loading your movie collection..." }
                        }
                    }
                }
            }
        },
    )
}

pub fn movie_list_fragment(movies: &[Movie], filtered: bool) -> String {
    content_div(html! {
        @if movies.is_empty() {
            div class="bg-white shadow rounded-lg p-8 text-center" {
                h3 class="text-2xl font-semibold text-gray-800" { "No movies found" }
                p class="mt-4 text-gray-600" {
                    @if filtered {
                        "Try adjusting your filter or create a new movie."
                    } @else {
                        "Start building your collection by adding your first movie!"
                    }
                }
                a class=(format!("mt-6 inline-block {PRIMARY_BUTTON}")) href="/ui/movies/create" { "Add First Movie" }
            }
        } @else {
            div class="grid gap-4 md:grid-cols-2" {
                @for movie in movies {
                    (movie_card(movie))
                }
            }
        }
    })
}

/// Shared create/edit form; `existing` selects edit mode.
pub fn movie_form_page(
    existing: Option<&Movie>,
    form: &MovieForm,
    ratings: &[PgRating],
    errors: &FormErrors,
) -> String {
    let (heading, action, submit) = match existing {
        Some(movie) => ("Edit Movie", format!("/ui/movies/{}/edit", movie.id), "Update Movie"),
        None => ("Add New Movie", "/ui/movies/create".to_string(), "Create Movie"),
    };

    page(
        heading,
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-2xl mx-auto px-6 py-12" {
                    div class="bg-white shadow rounded-lg p-8" {
                        div class="flex items-start justify-between gap-6" {
                            h1 class="text-3xl font-bold text-gray-900" { (heading) }
                            a class="text-sm text-blue-600 hover:text-blue-800" href="/ui/movies" { "Back to movies" }
                        }

                        @if let Some(message) = errors.get(GENERAL) {
                            div class="mt-6 bg-red-50 border border-red-200 rounded-lg p-4 text-red-700" { (message) }
                        }

                        form class="mt-8 space-y-6" method="post" action=(action) {
                            div {
                                label class="block text-sm font-medium text-gray-700" for="title" { "Movie Title *" }
                                input class=(INPUT_CLASS) type="text" id="title" name="title" value=(form.title) maxlength=(TITLE_MAX_CHARS) placeholder="Enter movie title..." required;
                                (field_error(errors.get("title")))
                            }

                            div {
                                label class="block text-sm font-medium text-gray-700" for="description" { "Description *" }
                                textarea class=(INPUT_CLASS) id="description" name="description" rows="4" placeholder="Enter movie description..." required {
                                    (form.description)
                                }
                                (field_error(errors.get("description")))
                            }

                            div {
                                label class="block text-sm font-medium text-gray-700" for="rating" { "PG Rating *" }
                                select class=(INPUT_CLASS) id="rating" name="rating" required {
                                    option value="" selected[form.rating.is_empty()] { "Select PG Rating..." }
                                    @for rating in ratings {
                                        option value=(rating.id) selected[form.rating == rating.id.to_string()] {
                                            (rating.code) " - " (rating.name)
                                        }
                                    }
                                }
                                (field_error(errors.get("rating")))
                            }

                            button class=(format!("w-full {PRIMARY_BUTTON}")) type="submit" { (submit) }
                        }
                    }
                }
            }
        },
    )
}

pub fn confirm_delete_page(movie: &Movie) -> String {
    page(
        "Delete Movie",
        html! {
            div class="min-h-screen bg-gray-50 flex items-center justify-center" {
                div class="max-w-md w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-xl font-semibold text-gray-900" { "Delete Movie" }
                        p class="mt-4 text-sm text-gray-600" {
                            "Are you sure you want to delete \"" (movie.title) "\"? This action cannot be undone."
                        }
                        form class="mt-6 flex justify-end gap-3" method="post" action=(format!("/ui/movies/{}/delete", movie.id)) {
                            a class="rounded-md border border-gray-300 px-4 py-2 text-gray-700 hover:bg-gray-50" href="/ui/movies" { "Cancel" }
                            button class="rounded-md bg-red-600 px-4 py-2 font-semibold text-white hover:bg-red-700" type="submit" { "Delete Movie" }
                        }
                    }
                }
            }
        },
    )
}

pub fn error_fragment(message: &str) -> String {
    content_div(html! {
        div class="bg-white shadow rounded-lg p-8" {
            h1 class="text-2xl font-bold text-gray-900" { "Error" }
            p class="mt-4 text-gray-700" { (message) }
            a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/ui/movies" { "Try again" }
        }
    })
}

pub fn error_page(message: &str) -> String {
    message_page("Error", message, "Try again")
}

pub fn not_found_page(resource: &str) -> String {
    message_page("Not found", &format!("{resource} not found"), "Back to movies")
}

fn message_page(title: &str, message: &str, link: &str) -> String {
    page(
        title,
        html! {
            div class="min-h-screen bg-gray-50 flex items-center justify-center" {
                div class="max-w-xl w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-2xl font-bold text-gray-900" { (title) }
                        p class="mt-4 text-gray-700" { (message) }
                        a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/ui/movies" { (link) }
                    }
                }
            }
        },
    )
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
                script type="module" src=(DATASTAR_CDN) {}
            }
            body { (body) }
        }
    }
    .into_string()
}

fn content_div(inner: Markup) -> String {
    html! { div id="content" class="mt-8" { (inner) } }.into_string()
}

fn movie_card(movie: &Movie) -> Markup {
    html! {
        div class="bg-white shadow rounded-lg p-6" {
            div class="flex items-start justify-between gap-4" {
                h2 class="text-xl font-semibold text-gray-900" { (movie.title) }
                @if let Some(rating) = &movie.pg_rating {
                    span class="rounded bg-purple-100 px-2 py-1 text-xs font-semibold text-purple-700" title=(rating.name) {
                        (rating.code)
                    }
                }
            }
            p class="mt-3 text-sm text-gray-700" { (movie.description) }
            div class="mt-4 flex gap-4 text-sm" {
                a class="text-blue-600 hover:text-blue-800" href=(format!("/ui/movies/{}/edit", movie.id)) { "Edit" }
                a class="text-red-600 hover:text-red-800" href=(format!("/ui/movies/{}/delete", movie.id)) { "Delete" }
            }
        }
    }
}

fn field_error(message: Option<&String>) -> Markup {
    html! {
        @if let Some(message) = message {
            p class="text-red-500 text-sm mt-1" { (message) }
        }
    }
}
