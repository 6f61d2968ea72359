use crate::options::{Fanout, Fetch};

/// One request to send: a variable over one or more years, optionally one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub variable: String,
    pub years: Vec<i32>,
    pub month: Option<u32>,
}

/// Expand the variables, years and (with `splitmonths`) months into jobs.
pub fn plan(fetch: &Fetch) -> Vec<Job> {
    let mut jobs = Vec::new();
    for variable in fetch.variables() {
        match fetch.fanout() {
            Fanout::Merge => jobs.push(Job {
                variable: variable.clone(),
                years: fetch.years().to_vec(),
                month: None,
            }),
            Fanout::Yearly => {
                for year in fetch.years() {
                    jobs.push(Job {
                        variable: variable.clone(),
                        years: vec![*year],
                        month: None,
                    });
                }
            }
            Fanout::SplitMonths => {
                for year in fetch.years() {
                    for month in fetch.months() {
                        jobs.push(Job {
                            variable: variable.clone(),
                            years: vec![*year],
                            month: Some(*month),
                        });
                    }
                }
            }
        }
    }
    jobs
}
