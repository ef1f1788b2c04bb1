//! Linear-space Myers O(ND) diff, used on regions where every shared line is
//! too frequent to anchor a histogram split.
//!
//! Lines with no equal on the other side are set aside before the search, so
//! it only runs over lines that can match. The search also stops after
//! [`MAX_COST`] steps, leaving the region as one replacement.

use std::collections::HashMap;
use std::ops::{Index, IndexMut};

use super::{push_hunk, Comparison, Hunk, LineComparator, Region};

/// Furthest `d` explored by the middle snake search, about half the edit
/// distance of a region.
const MAX_COST: usize = 1024;

/// Furthest-reaching x per diagonal `k`, indexed by signed `k`.
struct V {
    offset: isize,
    v: Vec<usize>,
}

impl V {
    fn new(max_d: usize) -> Self {
        Self {
            offset: max_d as isize,
            v: vec![0; 2 * max_d + 1],
        }
    }
}

impl Index<isize> for V {
    type Output = usize;

    fn index(&self, k: isize) -> &usize {
        &self.v[(k + self.offset) as usize]
    }
}

impl IndexMut<isize> for V {
    fn index_mut(&mut self, k: isize) -> &mut usize {
        &mut self.v[(k + self.offset) as usize]
    }
}

fn max_d(len_a: usize, len_b: usize) -> usize {
    (len_a + len_b + 1) / 2 + 1
}

/// Append the edit script for `region` to `out`.
///
/// The script is minimal unless the region needs more than `2 * MAX_COST`
/// edits among its matchable lines.
pub(crate) fn diff_region<S: AsRef<str>, C: LineComparator>(
    cmp: &Comparison<'_, S, C>,
    region: Region,
    out: &mut Vec<Hunk>,
) {
    let (keep_a, keep_b) = matchable_lines(cmp, &region);
    let lines_a: Vec<&str> = keep_a.iter().map(|&i| cmp.a.line(i)).collect();
    let lines_b: Vec<&str> = keep_b.iter().map(|&j| cmp.b.line(j)).collect();
    let kept = Comparison::new(&lines_a, &lines_b, cmp.comparator);

    let max_d = max_d(lines_a.len(), lines_b.len()).min(MAX_COST + 1);
    let mut vf = V::new(max_d);
    let mut vb = V::new(max_d);
    let mut script = Vec::new();
    let whole_kept = Region {
        begin_a: 0,
        end_a: lines_a.len(),
        begin_b: 0,
        end_b: lines_b.len(),
    };
    conquer(&kept, whole_kept, &mut vf, &mut vb, &mut script);

    // Lines between hunks of `script` are matches. Everything between two
    // consecutive matches, set-aside lines included, is a change.
    let end = Hunk {
        begin_a: lines_a.len(),
        end_a: lines_a.len(),
        begin_b: lines_b.len(),
        end_b: lines_b.len(),
    };
    let (mut a, mut b) = (region.begin_a, region.begin_b);
    let (mut ka, mut kb) = (0, 0);
    for hunk in script.iter().chain(std::iter::once(&end)) {
        while ka < hunk.begin_a {
            let (i, j) = (keep_a[ka], keep_b[kb]);
            push_hunk(
                out,
                Hunk {
                    begin_a: a,
                    end_a: i,
                    begin_b: b,
                    end_b: j,
                },
            );
            a = i + 1;
            b = j + 1;
            ka += 1;
            kb += 1;
        }
        ka = hunk.end_a;
        kb = hunk.end_b;
    }
    push_hunk(
        out,
        Hunk {
            begin_a: a,
            end_a: region.end_a,
            begin_b: b,
            end_b: region.end_b,
        },
    );
}

/// Positions of the lines in `region` that have an equal line on the other
/// side, for A and for B.
fn matchable_lines<S: AsRef<str>, C: LineComparator>(
    cmp: &Comparison<'_, S, C>,
    region: &Region,
) -> (Vec<usize>, Vec<usize>) {
    // One representative position per equivalence class, bucketed by hash.
    let mut classes_a: HashMap<u64, Vec<usize>> = HashMap::new();
    for i in region.begin_a..region.end_a {
        let bucket = classes_a.entry(cmp.a.hash(i)).or_default();
        if !bucket.iter().any(|&k| cmp.eq_a(k, i)) {
            bucket.push(i);
        }
    }
    let mut classes_b: HashMap<u64, Vec<usize>> = HashMap::new();
    for j in region.begin_b..region.end_b {
        let bucket = classes_b.entry(cmp.b.hash(j)).or_default();
        if !bucket.iter().any(|&k| cmp.eq_b(k, j)) {
            bucket.push(j);
        }
    }

    let keep_a = (region.begin_a..region.end_a)
        .filter(|&i| {
            classes_b
                .get(&cmp.a.hash(i))
                .is_some_and(|bucket| bucket.iter().any(|&j| cmp.eq(i, j)))
        })
        .collect();
    let keep_b = (region.begin_b..region.end_b)
        .filter(|&j| {
            classes_a
                .get(&cmp.b.hash(j))
                .is_some_and(|bucket| bucket.iter().any(|&i| cmp.eq(i, j)))
        })
        .collect();
    (keep_a, keep_b)
}

fn conquer<S: AsRef<str>, C: LineComparator>(
    cmp: &Comparison<'_, S, C>,
    mut region: Region,
    vf: &mut V,
    vb: &mut V,
    out: &mut Vec<Hunk>,
) {
    region.trim(cmp);

    if region.len_a() == 0 || region.len_b() == 0 {
        push_hunk(out, whole(&region));
        return;
    }

    match find_middle_snake(cmp, &region, vf, vb) {
        Some((x, y)) if splits(&region, x, y) => {
            let before = Region {
                begin_a: region.begin_a,
                end_a: x,
                begin_b: region.begin_b,
                end_b: y,
            };
            let after = Region {
                begin_a: x,
                end_a: region.end_a,
                begin_b: y,
                end_b: region.end_b,
            };
            conquer(cmp, before, vf, vb, out);
            conquer(cmp, after, vf, vb, out);
        }
        _ => {
            push_hunk(
                out,
                Hunk {
                    begin_a: region.begin_a,
                    end_a: region.end_a,
                    begin_b: region.begin_b,
                    end_b: region.begin_b,
                },
            );
            push_hunk(
                out,
                Hunk {
                    begin_a: region.end_a,
                    end_a: region.end_a,
                    begin_b: region.begin_b,
                    end_b: region.end_b,
                },
            );
        }
    }
}

/// A split point must lie inside the region and make progress on both halves.
fn splits(region: &Region, x: usize, y: usize) -> bool {
    let inside = (region.begin_a..=region.end_a).contains(&x)
        && (region.begin_b..=region.end_b).contains(&y);
    let at_start = x == region.begin_a && y == region.begin_b;
    let at_end = x == region.end_a && y == region.end_b;
    inside && !at_start && !at_end
}

fn whole(region: &Region) -> Hunk {
    Hunk {
        begin_a: region.begin_a,
        end_a: region.end_a,
        begin_b: region.begin_b,
        end_b: region.end_b,
    }
}

/// Run the forward and backward searches until they overlap and return the
/// absolute point where the optimal path crosses between them.
fn find_middle_snake<S: AsRef<str>, C: LineComparator>(
    cmp: &Comparison<'_, S, C>,
    region: &Region,
    vf: &mut V,
    vb: &mut V,
) -> Option<(usize, usize)> {
    let n = region.len_a();
    let m = region.len_b();
    let delta = n as isize - m as isize;
    let odd = delta & 1 == 1;

    vf[1] = 0;
    vb[1] = 0;

    // Any script needs at least |delta| edits.
    if delta.unsigned_abs() > 2 * MAX_COST {
        return None;
    }

    let d_max = max_d(n, m).min(MAX_COST + 1) as isize;
    for d in 0..d_max {
        for k in (-d..=d).rev().step_by(2) {
            let mut x = if k == -d || (k != d && vf[k - 1] < vf[k + 1]) {
                vf[k + 1]
            } else {
                vf[k - 1] + 1
            };
            let y = x as isize - k;
            let (x0, y0) = (x, y);
            if on_grid(x, y, n, m) {
                x += common_prefix(
                    cmp,
                    region.begin_a + x,
                    region.end_a,
                    region.begin_b + y as usize,
                    region.end_b,
                );
            }
            vf[k] = x;

            if odd
                && (k - delta).abs() <= d - 1
                && vf[k] + vb[-(k - delta)] >= n
                && within(x0, y0, n, m)
            {
                return Some((region.begin_a + x0, region.begin_b + y0 as usize));
            }
        }

        for k in (-d..=d).rev().step_by(2) {
            let mut x = if k == -d || (k != d && vb[k - 1] < vb[k + 1]) {
                vb[k + 1]
            } else {
                vb[k - 1] + 1
            };
            let mut y = x as isize - k;
            if on_grid(x, y, n, m) {
                let advance = common_suffix(
                    cmp,
                    region.begin_a,
                    region.begin_a + n - x,
                    region.begin_b,
                    region.begin_b + m - y as usize,
                );
                x += advance;
                y += advance as isize;
            }
            vb[k] = x;

            if !odd
                && (k - delta).abs() <= d
                && vb[k] + vf[-(k - delta)] >= n
                && within(x, y, n, m)
            {
                return Some((region.begin_a + n - x, region.begin_b + m - y as usize));
            }
        }
    }

    None
}

/// Strictly inside the edit graph, so another line pair can be compared.
fn on_grid(x: usize, y: isize, n: usize, m: usize) -> bool {
    x < n && y >= 0 && (y as usize) < m
}

/// Inside the edit graph or on its far edge.
fn within(x: usize, y: isize, n: usize, m: usize) -> bool {
    x <= n && y >= 0 && (y as usize) <= m
}

fn common_prefix<S: AsRef<str>, C: LineComparator>(
    cmp: &Comparison<'_, S, C>,
    mut a: usize,
    end_a: usize,
    mut b: usize,
    end_b: usize,
) -> usize {
    let start = a;
    while a < end_a && b < end_b && cmp.eq(a, b) {
        a += 1;
        b += 1;
    }
    a - start
}

fn common_suffix<S: AsRef<str>, C: LineComparator>(
    cmp: &Comparison<'_, S, C>,
    begin_a: usize,
    mut end_a: usize,
    begin_b: usize,
    mut end_b: usize,
) -> usize {
    let start = end_a;
    while end_a > begin_a && end_b > begin_b && cmp.eq(end_a - 1, end_b - 1) {
        end_a -= 1;
        end_b -= 1;
    }
    start - end_a
}
