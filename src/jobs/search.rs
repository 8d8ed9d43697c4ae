// src/jobs/search.rs
//! In-memory job search: filter predicates plus a single comparator sort.
//!
//! All predicates are pure and commutative (AND/OR over disjoint fields), so
//! application order never changes the result. The engine clones matching
//! jobs into a fresh vector; the input slice is never mutated.

use std::cmp::Ordering;

use serde::Deserialize;

use super::models::{EmploymentType, ExperienceLevel, Job, RemotePolicy};

// ============================================================================
// Filter configuration
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortBy {
    #[default]
    Newest,
    Oldest,
    #[serde(rename = "a-z")]
    TitleAsc,
    #[serde(rename = "z-a")]
    TitleDesc,
    SalaryHigh,
    SalaryLow,
}

#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    pub search_term: Option<String>,
    pub location: Option<String>,
    pub employment_type: Option<EmploymentType>,
    pub experience_level: Option<ExperienceLevel>,
    pub remote: Option<RemotePolicy>,
    /// One-directional: true keeps only sponsoring jobs, false filters nothing
    pub visa_sponsorship: bool,
    pub min_salary: Option<String>,
    pub max_salary: Option<String>,
    /// Every listed skill must match some job skill (case-insensitive substring)
    pub skills: Vec<String>,
    pub sort_by: SortBy,
}

/// Query-string shape of the filter config; empty strings mean "no filter"
#[derive(Debug, Default, Deserialize)]
pub struct JobFilterParams {
    pub search: Option<String>,
    pub location: Option<String>,
    pub employment_type: Option<String>,
    pub experience_level: Option<String>,
    pub remote: Option<String>,
    pub visa_sponsorship: Option<bool>,
    pub min_salary: Option<String>,
    pub max_salary: Option<String>,
    /// Comma-separated list of required skills
    pub skills: Option<String>,
    pub sort_by: Option<String>,
}

impl From<JobFilterParams> for JobFilter {
    fn from(params: JobFilterParams) -> Self {
        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        let skills = params
            .skills
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        let sort_by = match params.sort_by.as_deref() {
            Some("oldest") => SortBy::Oldest,
            Some("a-z") => SortBy::TitleAsc,
            Some("z-a") => SortBy::TitleDesc,
            Some("salary-high") => SortBy::SalaryHigh,
            Some("salary-low") => SortBy::SalaryLow,
            _ => SortBy::Newest,
        };

        JobFilter {
            search_term: non_empty(params.search),
            location: non_empty(params.location),
            employment_type: params
                .employment_type
                .as_deref()
                .and_then(EmploymentType::parse),
            experience_level: params
                .experience_level
                .as_deref()
                .and_then(ExperienceLevel::parse),
            remote: params.remote.as_deref().and_then(RemotePolicy::parse),
            visa_sponsorship: params.visa_sponsorship.unwrap_or(false),
            min_salary: non_empty(params.min_salary),
            max_salary: non_empty(params.max_salary),
            skills,
            sort_by,
        }
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Apply every filter predicate, returning the matching subset in input order
pub fn filter_jobs(jobs: &[Job], filter: &JobFilter) -> Vec<Job> {
    jobs.iter()
        .filter(|job| matches_filter(job, filter))
        .cloned()
        .collect()
}

/// Filter and then sort with the configured comparator
pub fn filter_and_sort(jobs: &[Job], filter: &JobFilter) -> Vec<Job> {
    let mut result = filter_jobs(jobs, filter);
    sort_jobs(&mut result, filter.sort_by);
    result
}

/// Stable sort using the selected comparator, with id as the final tie-break
/// so jobs with missing fields still land in a deterministic order.
pub fn sort_jobs(jobs: &mut [Job], sort_by: SortBy) {
    jobs.sort_by(|a, b| compare_jobs(a, b, sort_by).then_with(|| a.id.cmp(&b.id)));
}

fn compare_jobs(a: &Job, b: &Job, sort_by: SortBy) -> Ordering {
    match sort_by {
        SortBy::Newest => cmp_created(b, a),
        SortBy::Oldest => cmp_created(a, b),
        SortBy::TitleAsc => cmp_title(a, b),
        SortBy::TitleDesc => cmp_title(b, a),
        SortBy::SalaryHigh => cmp_salary(b, a),
        SortBy::SalaryLow => cmp_salary(a, b),
    }
}

// Jobs with no timestamp sort as oldest. Folding them into the key keeps
// the comparator a total order; the id tie-break then makes their relative
// order deterministic.
fn cmp_created(a: &Job, b: &Job) -> Ordering {
    let key = |j: &Job| j.created_at.unwrap_or(i64::MIN);
    key(a).cmp(&key(b))
}

fn cmp_title(a: &Job, b: &Job) -> Ordering {
    a.title.to_lowercase().cmp(&b.title.to_lowercase())
}

fn cmp_salary(a: &Job, b: &Job) -> Ordering {
    sort_salary_value(a)
        .partial_cmp(&sort_salary_value(b))
        .unwrap_or(Ordering::Equal)
}

/// Salary sort key: max falls back to min (and vice versa), then to 0
fn sort_salary_value(job: &Job) -> f64 {
    parse_salary(job.salary.max.as_deref())
        .or_else(|| parse_salary(job.salary.min.as_deref()))
        .unwrap_or(0.0)
}

/// Parse a salary string like "110000", " 110,000 " or "110000.50"
pub fn parse_salary(value: Option<&str>) -> Option<f64> {
    let cleaned: String = value?
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

fn matches_filter(job: &Job, filter: &JobFilter) -> bool {
    matches_search_term(job, filter.search_term.as_deref())
        && matches_location(job, filter.location.as_deref())
        && matches_employment_type(job, filter.employment_type)
        && matches_experience_level(job, filter.experience_level)
        && matches_remote(job, filter.remote)
        && matches_visa(job, filter.visa_sponsorship)
        && matches_min_salary(job, filter.min_salary.as_deref())
        && matches_max_salary(job, filter.max_salary.as_deref())
        && matches_skills(job, &filter.skills)
}

/// Case-insensitive substring OR across title, company, location,
/// description and each skill
fn matches_search_term(job: &Job, term: Option<&str>) -> bool {
    let term = match term {
        Some(t) if !t.is_empty() => t.to_lowercase(),
        _ => return true,
    };

    let contains = |field: Option<&str>| {
        field
            .map(|f| f.to_lowercase().contains(&term))
            .unwrap_or(false)
    };

    contains(Some(&job.title))
        || contains(job.company.as_deref())
        || contains(job.location.as_deref())
        || contains(job.description.as_deref())
        || job
            .skills
            .iter()
            .any(|skill| skill.to_lowercase().contains(&term))
}

fn matches_location(job: &Job, location: Option<&str>) -> bool {
    let location = match location {
        Some(l) if !l.is_empty() => l.to_lowercase(),
        _ => return true,
    };
    job.location
        .as_deref()
        .map(|l| l.to_lowercase().contains(&location))
        .unwrap_or(false)
}

fn matches_employment_type(job: &Job, wanted: Option<EmploymentType>) -> bool {
    match wanted {
        Some(t) => job.employment_type == Some(t),
        None => true,
    }
}

fn matches_experience_level(job: &Job, wanted: Option<ExperienceLevel>) -> bool {
    match wanted {
        Some(l) => job.experience_level == Some(l),
        None => true,
    }
}

fn matches_remote(job: &Job, wanted: Option<RemotePolicy>) -> bool {
    match wanted {
        Some(r) => job.remote == Some(r),
        None => true,
    }
}

fn matches_visa(job: &Job, required: bool) -> bool {
    !required || job.visa_sponsorship
}

/// A job whose salary string fails to parse is excluded under an active bound
fn matches_min_salary(job: &Job, min: Option<&str>) -> bool {
    let min = match parse_salary(min) {
        Some(m) => m,
        None => return true,
    };
    match parse_salary(job.salary.min.as_deref()) {
        Some(job_min) => job_min >= min,
        None => false,
    }
}

fn matches_max_salary(job: &Job, max: Option<&str>) -> bool {
    let max = match parse_salary(max) {
        Some(m) => m,
        None => return true,
    };
    match parse_salary(job.salary.max.as_deref()) {
        Some(job_max) => job_max <= max,
        None => false,
    }
}

/// AND across required skills, case-insensitive substring OR within job skills
fn matches_skills(job: &Job, required: &[String]) -> bool {
    if required.is_empty() {
        return true;
    }
    if job.skills.is_empty() {
        return false;
    }
    required.iter().all(|wanted| {
        let wanted = wanted.to_lowercase();
        job.skills
            .iter()
            .any(|skill| skill.to_lowercase().contains(&wanted))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::models::{JobStatus, Salary};

    fn job(id: &str, title: &str) -> Job {
        Job {
            id: id.to_string(),
            recruiter_id: "U_TEST01".to_string(),
            title: title.to_string(),
            company: None,
            location: None,
            employment_type: None,
            experience_level: None,
            remote: None,
            salary: Salary::default(),
            skills: Vec::new(),
            visa_sponsorship: false,
            status: JobStatus::Active,
            description: None,
            requirements: None,
            benefits: None,
            job_simulation: None,
            key_qualifications: None,
            views: 0,
            applicants: 0,
            created_at: Some(100),
            updated_at: None,
        }
    }

    fn skills(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_filter_is_identity() {
        let jobs = vec![job("J_1", "Backend"), job("J_2", "Frontend")];
        let result = filter_jobs(&jobs, &JobFilter::default());
        assert_eq!(result, jobs);
    }

    #[test]
    fn test_filter_result_is_subset_and_idempotent() {
        let mut a = job("J_1", "Backend Engineer");
        a.skills = skills(&["Rust"]);
        let b = job("J_2", "Designer");
        let jobs = vec![a, b];

        let filter = JobFilter {
            skills: skills(&["rust"]),
            ..Default::default()
        };

        let once = filter_jobs(&jobs, &filter);
        assert!(once.iter().all(|j| jobs.contains(j)));

        let twice = filter_jobs(&once, &filter);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let jobs = vec![job("J_2", "B"), job("J_1", "A")];
        let before = jobs.clone();
        let filter = JobFilter {
            sort_by: SortBy::TitleAsc,
            ..Default::default()
        };
        let _ = filter_and_sort(&jobs, &filter);
        assert_eq!(jobs, before);
    }

    #[test]
    fn test_search_term_matches_any_field() {
        let mut by_title = job("J_1", "Rust Engineer");
        by_title.company = Some("Acme".to_string());
        let mut by_company = job("J_2", "Engineer");
        by_company.company = Some("Rustwerk GmbH".to_string());
        let mut by_skill = job("J_3", "Engineer");
        by_skill.skills = skills(&["Rust", "Tokio"]);
        let mut by_description = job("J_4", "Engineer");
        by_description.description = Some("We write Rust all day".to_string());
        let miss = job("J_5", "Gardener");

        let filter = JobFilter {
            search_term: Some("rust".to_string()),
            ..Default::default()
        };
        let result = filter_jobs(
            &[by_title, by_company, by_skill, by_description, miss],
            &filter,
        );
        let ids: Vec<&str> = result.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["J_1", "J_2", "J_3", "J_4"]);
    }

    #[test]
    fn test_location_filter_is_substring_and() {
        let mut berlin = job("J_1", "Engineer");
        berlin.location = Some("Berlin, Germany".to_string());
        let mut remote = job("J_2", "Engineer");
        remote.location = Some("Remote".to_string());
        let nowhere = job("J_3", "Engineer");

        let filter = JobFilter {
            location: Some("berlin".to_string()),
            ..Default::default()
        };
        let result = filter_jobs(&[berlin, remote, nowhere], &filter);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "J_1");
    }

    #[test]
    fn test_categorical_filters_exact_match() {
        let mut full_time = job("J_1", "Engineer");
        full_time.employment_type = Some(EmploymentType::FullTime);
        let mut contract = job("J_2", "Engineer");
        contract.employment_type = Some(EmploymentType::Contract);
        let untyped = job("J_3", "Engineer");

        let filter = JobFilter {
            employment_type: Some(EmploymentType::FullTime),
            ..Default::default()
        };
        let result = filter_jobs(&[full_time, contract, untyped], &filter);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "J_1");
    }

    #[test]
    fn test_visa_filter_is_one_directional() {
        let mut sponsoring = job("J_1", "Engineer");
        sponsoring.visa_sponsorship = true;
        let not_sponsoring = job("J_2", "Engineer");
        let jobs = vec![sponsoring, not_sponsoring];

        let on = JobFilter {
            visa_sponsorship: true,
            ..Default::default()
        };
        assert_eq!(filter_jobs(&jobs, &on).len(), 1);

        // false applies no filtering at all
        let off = JobFilter::default();
        assert_eq!(filter_jobs(&jobs, &off).len(), 2);
    }

    #[test]
    fn test_min_salary_bound() {
        let mut low = job("J_1", "Engineer");
        low.salary.min = Some("90000".to_string());
        let mut high = job("J_2", "Engineer");
        high.salary.min = Some("120000".to_string());

        let filter = JobFilter {
            min_salary: Some("100000".to_string()),
            ..Default::default()
        };
        let result = filter_jobs(&[low, high], &filter);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "J_2");
    }

    #[test]
    fn test_unparseable_salary_excluded_under_active_bound() {
        let mut vague = job("J_1", "Engineer");
        vague.salary.min = Some("competitive".to_string());
        let missing = job("J_2", "Engineer");

        let filter = JobFilter {
            min_salary: Some("50000".to_string()),
            ..Default::default()
        };
        assert!(filter_jobs(&[vague, missing], &filter).is_empty());
    }

    #[test]
    fn test_skills_case_insensitive_substring() {
        let mut react = job("J_1", "Engineer");
        react.skills = skills(&["React", "Node.js"]);
        let mut vue = job("J_2", "Engineer");
        vue.skills = skills(&["Vue"]);

        let filter = JobFilter {
            skills: skills(&["react"]),
            ..Default::default()
        };
        let result = filter_jobs(&[react, vue], &filter);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "J_1");
    }

    #[test]
    fn test_skills_filter_requires_all() {
        let mut partial = job("J_1", "Engineer");
        partial.skills = skills(&["React"]);
        let mut both = job("J_2", "Engineer");
        both.skills = skills(&["React", "TypeScript"]);

        let filter = JobFilter {
            skills: skills(&["react", "typescript"]),
            ..Default::default()
        };
        let result = filter_jobs(&[partial, both], &filter);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "J_2");
    }

    #[test]
    fn test_no_skills_list_excluded_by_active_skills_filter() {
        let bare = job("J_1", "Engineer");
        let filter = JobFilter {
            skills: skills(&["rust"]),
            ..Default::default()
        };
        assert!(filter_jobs(&[bare], &filter).is_empty());
    }

    #[test]
    fn test_backend_engineer_scenario() {
        let mut backend = job("J_1", "Backend Engineer");
        backend.salary = Salary {
            min: Some("110000".to_string()),
            max: Some("140000".to_string()),
            ..Default::default()
        };
        backend.skills = skills(&["Node.js", "Express"]);

        let filter = JobFilter {
            min_salary: Some("100000".to_string()),
            skills: skills(&["node"]),
            ..Default::default()
        };
        assert_eq!(filter_jobs(&[backend], &filter).len(), 1);
    }

    #[test]
    fn test_sort_newest_puts_latest_first() {
        let mut old = job("J_1", "Old");
        old.created_at = Some(100);
        let mut new = job("J_2", "New");
        new.created_at = Some(200);

        let filter = JobFilter::default();
        let result = filter_and_sort(&[old, new], &filter);
        assert_eq!(result[0].id, "J_2");
        assert_eq!(result[1].id, "J_1");
    }

    #[test]
    fn test_sort_oldest_reverses_newest() {
        let mut a = job("J_1", "A");
        a.created_at = Some(100);
        let mut b = job("J_2", "B");
        b.created_at = Some(200);
        let mut c = job("J_3", "C");
        c.created_at = Some(300);
        let jobs = vec![a, b, c];

        let newest = filter_and_sort(
            &jobs,
            &JobFilter {
                sort_by: SortBy::Newest,
                ..Default::default()
            },
        );
        let oldest = filter_and_sort(
            &jobs,
            &JobFilter {
                sort_by: SortBy::Oldest,
                ..Default::default()
            },
        );

        let forward: Vec<&str> = newest.iter().map(|j| j.id.as_str()).collect();
        let mut backward: Vec<&str> = oldest.iter().map(|j| j.id.as_str()).collect();
        backward.reverse();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_sort_title_asc_desc_are_reverses_without_ties() {
        let jobs = vec![job("J_1", "Zookeeper"), job("J_2", "analyst"), job("J_3", "Manager")];

        let asc = filter_and_sort(
            &jobs,
            &JobFilter {
                sort_by: SortBy::TitleAsc,
                ..Default::default()
            },
        );
        let desc = filter_and_sort(
            &jobs,
            &JobFilter {
                sort_by: SortBy::TitleDesc,
                ..Default::default()
            },
        );

        let forward: Vec<&str> = asc.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(forward, vec!["J_2", "J_3", "J_1"]);
        let mut backward: Vec<&str> = desc.iter().map(|j| j.id.as_str()).collect();
        backward.reverse();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_sort_salary_high_uses_fallback_chain() {
        let mut full_range = job("J_1", "A");
        full_range.salary.max = Some("140000".to_string());
        let mut min_only = job("J_2", "B");
        min_only.salary.min = Some("150000".to_string());
        let unpriced = job("J_3", "C");

        let filter = JobFilter {
            sort_by: SortBy::SalaryHigh,
            ..Default::default()
        };
        let result = filter_and_sort(&[full_range, min_only, unpriced], &filter);
        let ids: Vec<&str> = result.iter().map(|j| j.id.as_str()).collect();
        // min-only falls back to min (150k) > max (140k) > unparseable (0)
        assert_eq!(ids, vec!["J_2", "J_1", "J_3"]);
    }

    #[test]
    fn test_missing_created_at_gets_deterministic_id_tiebreak() {
        let mut dated = job("J_2", "Dated");
        dated.created_at = Some(100);
        let mut undated_b = job("J_3", "Undated B");
        undated_b.created_at = None;
        let mut undated_a = job("J_1", "Undated A");
        undated_a.created_at = None;
        let jobs = vec![dated, undated_b, undated_a];

        let first = filter_and_sort(
            &jobs,
            &JobFilter {
                sort_by: SortBy::Newest,
                ..Default::default()
            },
        );
        let second = filter_and_sort(
            &jobs,
            &JobFilter {
                sort_by: SortBy::Newest,
                ..Default::default()
            },
        );
        assert_eq!(first, second);

        // Undated jobs sort as oldest, so under Newest they come last,
        // and the id tie-break fixes their relative order.
        let ids: Vec<&str> = first.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["J_2", "J_1", "J_3"]);
    }

    #[test]
    fn test_parse_salary_variants() {
        assert_eq!(parse_salary(Some("110000")), Some(110000.0));
        assert_eq!(parse_salary(Some(" 110,000 ")), Some(110000.0));
        assert_eq!(parse_salary(Some("95000.50")), Some(95000.5));
        assert_eq!(parse_salary(Some("competitive")), None);
        assert_eq!(parse_salary(Some("")), None);
        assert_eq!(parse_salary(None), None);
    }

    #[test]
    fn test_filter_params_conversion_treats_empty_as_no_filter() {
        let params = JobFilterParams {
            search: Some("   ".to_string()),
            location: Some("".to_string()),
            employment_type: Some("".to_string()),
            skills: Some("react, , node".to_string()),
            sort_by: Some("salary-high".to_string()),
            ..Default::default()
        };
        let filter = JobFilter::from(params);
        assert!(filter.search_term.is_none());
        assert!(filter.location.is_none());
        assert!(filter.employment_type.is_none());
        assert_eq!(filter.skills, vec!["react", "node"]);
        assert_eq!(filter.sort_by, SortBy::SalaryHigh);
    }
}
