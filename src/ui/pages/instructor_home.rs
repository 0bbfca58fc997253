//! Instructor dashboard.
//!
//! Consumes the instructor REST surface: profile, dashboard statistics, and
//! the full course CRUD (create, list own/all, edit, delete).

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::core::auth::claims::Role;
use crate::ui::auth::{RequireRole, UserMenu};
use crate::ui::courses_client::{
    Course, CoursePayload, InstructorDashboard, InstructorProfile, create_course, delete_course,
    fetch_all_courses, fetch_course, fetch_dashboard, fetch_my_courses, fetch_profile,
    update_course,
};
use crate::ui::notifications::use_notifications;

/// Instructor dashboard page
#[component]
pub fn InstructorHomePage() -> impl IntoView {
    view! {
        <RequireRole role=Role::Instructor>
            <InstructorDashboardView />
        </RequireRole>
    }
}

#[component]
fn InstructorDashboardView() -> impl IntoView {
    let notifications = use_notifications();

    let profile = RwSignal::new(None::<InstructorProfile>);
    let stats = RwSignal::new(None::<InstructorDashboard>);
    let courses = RwSignal::new(Vec::<Course>::new());
    // false: own courses, true: every course on the platform
    let show_all = RwSignal::new(false);
    // Course id currently loaded into the edit form
    let editing = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    // Form state
    let title = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());

    let reload_courses = move || {
        spawn_local(async move {
            let result = if show_all.get_untracked() {
                fetch_all_courses().await
            } else {
                fetch_my_courses().await
            };
            match result {
                Ok(list) => courses.set(list),
                Err(error) => notifications.error("Failed to load courses", error),
            }
        });
    };

    let reload_stats = move || {
        spawn_local(async move {
            if let Ok(dashboard) = fetch_dashboard().await {
                stats.set(Some(dashboard));
            }
        });
    };

    // Initial load: profile, statistics, and the course list
    Effect::new(move |_| {
        spawn_local(async move {
            if let Ok(loaded) = fetch_profile().await {
                profile.set(Some(loaded));
            }
        });
        reload_stats();
        reload_courses();
    });

    let reset_form = move || {
        editing.set(None);
        title.set(String::new());
        description.set(String::new());
    };

    // Load a course into the edit form
    let on_edit = move |id: String| {
        spawn_local(async move {
            match fetch_course(&id).await {
                Ok(course) => {
                    title.set(course.title);
                    description.set(course.description);
                    editing.set(Some(course.id));
                }
                Err(error) => notifications.error("Failed to load course", error),
            }
        });
    };

    let on_delete = move |id: String| {
        spawn_local(async move {
            match delete_course(&id).await {
                Ok(()) => {
                    notifications.success("Course deleted", "The course has been removed.");
                    reload_stats();
                    reload_courses();
                }
                Err(error) => notifications.error("Failed to delete course", error),
            }
        });
    };

    // Create or update, depending on whether a course is loaded in the form
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        if saving.get_untracked() {
            return;
        }

        let payload = CoursePayload {
            title: title.get(),
            description: description.get(),
        };
        if payload.title.trim().is_empty() || payload.description.trim().is_empty() {
            notifications.error("Invalid course", "Title and description are required.");
            return;
        }

        saving.set(true);
        let current = editing.get_untracked();

        spawn_local(async move {
            let result = match &current {
                Some(id) => update_course(id, &payload).await.map(|_| "Course updated"),
                None => create_course(&payload).await.map(|_| "Course created"),
            };

            saving.set(false);

            match result {
                Ok(message) => {
                    notifications.success(message, payload.title.clone());
                    reset_form();
                    reload_stats();
                    reload_courses();
                }
                Err(error) => notifications.error("Failed to save course", error),
            }
        });
    };

    view! {
        <div class="dashboard">
            <header class="dashboard-header">
                <span class="dashboard-logo">"StudyHub"</span>
                <UserMenu />
            </header>

            <main class="dashboard-main">
                <section class="dashboard-stats">
                    <h1>
                        {move || {
                            profile
                                .get()
                                .map(|p| format!("Instructor dashboard: {}", p.username))
                                .unwrap_or_else(|| "Instructor dashboard".to_string())
                        }}
                    </h1>
                    {move || {
                        stats.get().map(|s| {
                            view! {
                                <p class="dashboard-stat">
                                    {format!("{} course(s) published", s.total_courses)}
                                </p>
                            }
                        })
                    }}
                </section>

                <section class="course-form">
                    <h2>
                        {move || {
                            if editing.get().is_some() {
                                "Edit course"
                            } else {
                                "Create a course"
                            }
                        }}
                    </h2>
                    <form on:submit=on_submit>
                        <div class="course-form-field">
                            <label for="course-title">"Title"</label>
                            <input
                                type="text"
                                id="course-title"
                                prop:value=move || title.get()
                                on:input=move |ev| title.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="course-form-field">
                            <label for="course-description">"Description"</label>
                            <textarea
                                id="course-description"
                                prop:value=move || description.get()
                                on:input=move |ev| description.set(event_target_value(&ev))
                            ></textarea>
                        </div>
                        <div class="course-form-actions">
                            <button type="submit" disabled=move || saving.get()>
                                {move || {
                                    if saving.get() {
                                        "Saving..."
                                    } else if editing.get().is_some() {
                                        "Update course"
                                    } else {
                                        "Create course"
                                    }
                                }}
                            </button>
                            {move || {
                                editing.get().map(|_| {
                                    view! {
                                        <button
                                            type="button"
                                            on:click=move |_| reset_form()
                                        >
                                            "Cancel"
                                        </button>
                                    }
                                })
                            }}
                        </div>
                    </form>
                </section>

                <section class="course-list">
                    <div class="course-list-header">
                        <h2>
                            {move || if show_all.get() { "All courses" } else { "My courses" }}
                        </h2>
                        <button
                            type="button"
                            on:click=move |_| {
                                show_all.update(|v| *v = !*v);
                                reload_courses();
                            }
                        >
                            {move || {
                                if show_all.get() {
                                    "Show my courses"
                                } else {
                                    "Show all courses"
                                }
                            }}
                        </button>
                    </div>

                    {move || {
                        let list = courses.get();
                        if list.is_empty() {
                            view! { <p class="course-list-empty">"No courses yet."</p> }
                                .into_any()
                        } else {
                            list.into_iter()
                                .map(|course| {
                                    let edit_id = course.id.clone();
                                    let delete_id = course.id.clone();
                                    view! {
                                        <article class="course-card">
                                            <h3>{course.title.clone()}</h3>
                                            <p>{course.description.clone()}</p>
                                            <span class="course-card-owner">
                                                {format!("by {}", course.instructor)}
                                            </span>
                                            <div class="course-card-actions">
                                                <button
                                                    type="button"
                                                    on:click=move |_| on_edit(edit_id.clone())
                                                >
                                                    "Edit"
                                                </button>
                                                <button
                                                    type="button"
                                                    on:click=move |_| on_delete(delete_id.clone())
                                                >
                                                    "Delete"
                                                </button>
                                            </div>
                                        </article>
                                    }
                                })
                                .collect_view()
                                .into_any()
                        }
                    }}
                </section>
            </main>
        </div>
    }
}
