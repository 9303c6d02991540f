use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::{ParseError, Url};

use crate::{
    Error, Result,
    catalog::PageRequest,
    collection::{ListChange, Membership},
    config::Cfg,
    entities::{
        Artist, Card, CollectionCard, Group, GroupId, OfficialSource, ProposedCard, UserId,
    },
    moderation::{Decision, Verdict},
    proposal::Submission,
};

mod rows;

use rows::{
    ArtistRow, CardRow, CardSummaryRow, GroupRow, MembershipForm, ModerationBody, SourceRow,
};

/// Central access point for the catalog backend.
///
/// Every page of the front-end goes through the [`Api`] for its data. It is cheap to clone, and
/// clones share the HTTP connection pool and the core configuration, so a change to the
/// configured `api_url` is picked up by every clone on its next request.
#[derive(Clone, Debug)]
pub struct Api {
    http: Client,
    cfg: Cfg,
}

impl Api {
    pub fn new(cfg: Cfg) -> Result<Self> {
        // Fail early on a base URL we could never build endpoints from
        Url::parse(&cfg.read().api_url)?;

        let http = Client::builder()
            .user_agent(format!("BiasFinder/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, cfg })
    }

    pub fn cfg(&self) -> &Cfg {
        &self.cfg
    }

    pub async fn groups(&self) -> Result<Vec<Group>> {
        let url = self.endpoint(["api", "groupslist"])?;
        debug!(url = %url, "Fetching groups");

        let rows: Vec<GroupRow> = expect_json(self.http.get(url).send().await?).await?;
        Ok(rows.into_iter().map(Group::from).collect())
    }

    pub async fn artists(&self, group: GroupId) -> Result<Vec<Artist>> {
        let url = self.endpoint(["api", "groups", group.to_string().as_str(), "artists"])?;
        debug!(url = %url, "Fetching artists");

        let rows: Vec<ArtistRow> = expect_json(self.http.get(url).send().await?).await?;
        Ok(rows.into_iter().map(Artist::from).collect())
    }

    /// Official sources of a group. The backend looks these up by group *name*.
    pub async fn official_sources(&self, group_name: &str) -> Result<Vec<OfficialSource>> {
        let mut url = self.endpoint(["api", "groups", "official-sources"])?;
        url.query_pairs_mut().append_pair("groupName", group_name);
        debug!(url = %url, "Fetching official sources");

        let rows: Vec<SourceRow> = expect_json(self.http.get(url).send().await?).await?;
        Ok(rows.into_iter().map(OfficialSource::from).collect())
    }

    pub async fn photocards(&self, request: &PageRequest) -> Result<Vec<Card>> {
        let mut url = self.endpoint(["api", "photocards"])?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("page", &request.page.to_string())
                .append_pair("size", &request.size.to_string());
            if let Some(group) = request.filter.group {
                query.append_pair("groupId", &group.to_string());
            }
            if let Some(artist) = request.filter.artist {
                query.append_pair("artistId", &artist.to_string());
            }
        }
        debug!(url = %url, "Fetching photocards");

        let rows: Vec<CardRow> = expect_json(self.http.get(url).send().await?).await?;
        debug!(page = request.page, count = rows.len(), "Fetched photocards");
        Ok(rows.into_iter().map(Card::from).collect())
    }

    /// Cards the user owns
    pub async fn collection(&self, user: UserId) -> Result<Vec<CollectionCard>> {
        self.user_list(user, "collection").await
    }

    pub async fn wishlist(&self, user: UserId) -> Result<Vec<CollectionCard>> {
        self.user_list(user, "wishlist").await
    }

    /// Send a collection toggle. Only transport failures are errors: the response status is
    /// logged and otherwise ignored.
    pub async fn change_membership(&self, change: &ListChange) -> Result<()> {
        let url = self.endpoint(["api", "users", change.user.to_string().as_str(), "photocards"])?;
        let method = match change.action {
            Membership::Add => Method::POST,
            Membership::Remove => Method::DELETE,
        };
        debug!(url = %url, %method, card = %change.card, list = %change.list, "Changing membership");

        let response = self
            .http
            .request(method, url)
            .form(&MembershipForm {
                photocard_id: change.card,
                have: change.list.have(),
            })
            .send()
            .await?;

        log_unsuccessful(&response, "membership change");
        Ok(())
    }

    pub async fn proposed_cards(&self) -> Result<Vec<ProposedCard>> {
        let url = self.endpoint(["api", "proposedphotocards"])?;
        debug!(url = %url, "Fetching proposed cards");

        let rows: Vec<CardSummaryRow> = expect_json(self.http.get(url).send().await?).await?;
        Ok(rows.into_iter().map(ProposedCard::from).collect())
    }

    /// Send a batched accept or reject. Like [`Api::change_membership`], the response status is
    /// not checked.
    pub async fn moderate(&self, decision: &Decision) -> Result<()> {
        let (method, url) = match decision.verdict {
            Verdict::Accept => (Method::PATCH, self.endpoint(["api", "admin", "accept"])?),
            Verdict::Reject => (Method::DELETE, self.endpoint(["api", "admin", "reject"])?),
        };
        debug!(url = %url, %method, count = decision.ids.len(), "Moderating proposed cards");

        let response = self
            .http
            .request(method, url)
            .json(&ModerationBody {
                photocard_ids: &decision.ids,
            })
            .send()
            .await?;

        log_unsuccessful(&response, "moderation");
        Ok(())
    }

    /// Send a card or source proposal. A non-success status is an [`Error::Server`] carrying the
    /// backend's response text.
    pub async fn propose(&self, submission: &Submission) -> Result<()> {
        let url = match submission {
            Submission::Card(card) => {
                let mut url = self.endpoint(["api", "photocards", "proposecard"])?;
                url.path_segments_mut()
                    .map_err(|()| Error::InvalidUrl(ParseError::RelativeUrlWithCannotBeABaseBase))?
                    .extend(card.path_segments());
                url
            }
            Submission::Source(source) => {
                let mut url = self.endpoint(["api", "officialsource", "propose"])?;
                url.query_pairs_mut().extend_pairs(source.query_pairs());
                url
            }
        };
        debug!(url = %url, "Sending proposal");

        let response = self.http.post(url).send().await?;
        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if status.is_success() {
            Ok(())
        } else {
            Err(Error::Server {
                status: status.as_u16(),
                message: text,
            })
        }
    }

    async fn user_list(&self, user: UserId, list: &str) -> Result<Vec<CollectionCard>> {
        let url = self.endpoint(["api", "users", user.to_string().as_str(), list])?;
        debug!(url = %url, "Fetching user list");

        let rows: Vec<CardSummaryRow> = expect_json(self.http.get(url).send().await?).await?;
        Ok(rows.into_iter().map(CollectionCard::from).collect())
    }

    /// Build an endpoint URL below the configured origin. Segments are percent-encoded.
    fn endpoint<'a, I>(&self, segments: I) -> Result<Url>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut url = Url::parse(&self.cfg.read().api_url)?;
        url.path_segments_mut()
            .map_err(|()| Error::InvalidUrl(ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

async fn expect_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();

    if status.is_success() {
        response
            .json()
            .await
            .map_err(|e| Error::Parse(e.to_string()))
    } else {
        let message = response.text().await.unwrap_or_default();
        Err(Error::Server {
            status: status.as_u16(),
            message,
        })
    }
}

fn log_unsuccessful(response: &Response, what: &str) {
    let status = response.status();
    if !status.is_success() {
        warn!(%status, "Backend answered {what} with a non-success status, ignoring");
    }
}
