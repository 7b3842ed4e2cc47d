//! Newick parser.
//!
//! Supports the dialect Nextstrain exports use: nested `(...)` groups,
//! named internal nodes, optional single-quoted labels, and optional
//! `:length` branch lengths, terminated by `;`. Unnamed internal nodes are
//! allowed; unnamed leaves are not.

use nom::{
    branch::alt,
    bytes::complete::{is_not, take_while1},
    character::complete::{char, multispace0},
    combinator::{map, opt},
    multi::separated_list1,
    number::complete::double,
    sequence::{delimited, preceded, terminated},
    IResult,
};

use crate::{Tree, TreeError};

/// Parse tree before arena flattening.
#[derive(Debug, Clone)]
pub(crate) struct RawNode {
    pub(crate) name: String,
    pub(crate) dist: Option<f64>,
    pub(crate) children: Vec<RawNode>,
}

/// Parse a complete Newick document into a [`Tree`].
pub fn parse(input: &str) -> Result<Tree, TreeError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TreeError::Empty);
    }
    match document(trimmed) {
        Ok((rest, root)) => {
            let rest = rest.trim();
            if !rest.is_empty() {
                return Err(TreeError::TrailingContent {
                    snippet: snippet(rest),
                });
            }
            Ok(Tree::from_raw(root))
        }
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(TreeError::Parse {
            snippet: snippet(e.input),
        }),
        Err(nom::Err::Incomplete(_)) => Err(TreeError::Parse {
            snippet: snippet(trimmed),
        }),
    }
}

fn document(input: &str) -> IResult<&str, RawNode> {
    terminated(subtree, preceded(multispace0, char(';')))(input)
}

fn subtree(input: &str) -> IResult<&str, RawNode> {
    preceded(multispace0, alt((internal, leaf)))(input)
}

fn internal(input: &str) -> IResult<&str, RawNode> {
    let (input, children) = delimited(
        char('('),
        separated_list1(char(','), terminated(subtree, multispace0)),
        char(')'),
    )(input)?;
    let (input, name) = opt(label)(input)?;
    let (input, dist) = opt(branch_length)(input)?;
    Ok((
        input,
        RawNode {
            name: name.unwrap_or_default(),
            dist,
            children,
        },
    ))
}

fn leaf(input: &str) -> IResult<&str, RawNode> {
    let (input, name) = label(input)?;
    let (input, dist) = opt(branch_length)(input)?;
    Ok((
        input,
        RawNode {
            name,
            dist,
            children: Vec::new(),
        },
    ))
}

fn label(input: &str) -> IResult<&str, String> {
    alt((quoted_label, bare_label))(input)
}

fn bare_label(input: &str) -> IResult<&str, String> {
    map(
        take_while1(|c: char| {
            !matches!(c, '(' | ')' | ',' | ':' | ';' | '\'' | '[' | ']') && !c.is_whitespace()
        }),
        str::to_string,
    )(input)
}

fn quoted_label(input: &str) -> IResult<&str, String> {
    map(delimited(char('\''), is_not("'"), char('\'')), str::to_string)(input)
}

fn branch_length(input: &str) -> IResult<&str, f64> {
    preceded(
        preceded(multispace0, char(':')),
        preceded(multispace0, double),
    )(input)
}

fn snippet(input: &str) -> String {
    input.chars().take(40).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn parses_named_internal_nodes_and_lengths() {
        let tree = parse("(A:0.1,B:0.2)NODE_1:0.0;").unwrap();
        assert_eq!(tree.len(), 3);
        let root = tree.root();
        assert_eq!(tree.name(root), "NODE_1");
        let a = tree.find_by_name("A").unwrap().unwrap();
        assert_eq!(tree.parent(a), Some(root));
        assert_relative_eq!(tree.dist(a), 0.1);
    }

    #[test]
    fn parses_single_child_chains() {
        // Nextstrain trees carry unary internal nodes after subsampling.
        let tree = parse("((child2:0.2)child1:0.1)root:0.0;").unwrap();
        assert_eq!(tree.len(), 3);
        let names: Vec<&str> = tree.preorder().map(|id| tree.name(id)).collect();
        assert_eq!(names, vec!["root", "child1", "child2"]);
    }

    #[test]
    fn tolerates_whitespace_and_quoted_labels() {
        let tree = parse("( 'Wuhan/Hu-1/2019' : 0.0 ,\n  B : 1e-4 )NODE_0 ;").unwrap();
        assert_eq!(tree.len(), 3);
        assert!(tree.find_by_name("Wuhan/Hu-1/2019").unwrap().is_some());
    }

    #[test]
    fn missing_length_defaults_to_zero() {
        let tree = parse("(A,B)R;").unwrap();
        let a = tree.find_by_name("A").unwrap().unwrap();
        assert_relative_eq!(tree.dist(a), 0.0);
    }

    #[test]
    fn rejects_garbage_and_trailing_content() {
        assert!(matches!(parse(""), Err(TreeError::Empty)));
        assert!(matches!(parse("not a tree"), Err(TreeError::Parse { .. })));
        assert!(matches!(
            parse("(A,B)R; extra"),
            Err(TreeError::TrailingContent { .. })
        ));
    }
}
