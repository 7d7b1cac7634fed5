//! Record-list query functions.
//!
//! Each function in here parses a response to a query for one record type
//! into a [`DataChain`]. They all share the same framing rules: the
//! message needs a complete header, exactly one question, and at least one
//! answer record. The question name has to be a valid host name. Records
//! of other types or classes are skipped. Any framing error in the answer
//! section fails the whole call with [`Error::BadResponse`]. If no record
//! matches, the result is an empty chain.
//!
//! For callers that deal in legacy status codes, [`store_reply`] converts
//! the result of any of the functions.

use super::data::{ChainBuilder, DataChain};
use super::error::Error;
use crate::base::header::Header;
use crate::base::iana::{Class, Rtype};
use crate::base::name::NameMode;
use crate::base::record::{AnswerRecord, Response};
use crate::rdata::{
    CaaReply, MxReply, NaptrReply, SoaReply, SrvReply, TxtReply, UriReply,
};
use octseq::parse::Parser;
use tracing::{debug, trace};

/// Parses a response to a CAA query.
///
/// Records of class IN and CH are accepted.
pub fn parse_caa_reply(msg: &[u8]) -> Result<DataChain, Error> {
    parse_reply(msg, CaaReply::RTYPE, &[Class::IN, Class::CH], |record, chain| {
        chain.push(CaaReply::parse(record)?)
    })
}

/// Parses a response to an MX query.
pub fn parse_mx_reply(msg: &[u8]) -> Result<DataChain, Error> {
    parse_reply(msg, MxReply::RTYPE, &[Class::IN], |record, chain| {
        chain.push(MxReply::parse(record)?)
    })
}

/// Parses a response to an SRV query.
pub fn parse_srv_reply(msg: &[u8]) -> Result<DataChain, Error> {
    parse_reply(msg, SrvReply::RTYPE, &[Class::IN], |record, chain| {
        chain.push(SrvReply::parse(record)?)
    })
}

/// Parses a response to a TXT query.
///
/// Each character string becomes its own node. The first node of each
/// record has its `record_start` flag set.
pub fn parse_txt_reply(msg: &[u8]) -> Result<DataChain, Error> {
    parse_reply(msg, TxtReply::RTYPE, &[Class::IN], |record, chain| {
        chain.extend(TxtReply::parse(record)?)
    })
}

/// Parses a response to an SOA query.
///
/// Only the first SOA record is used, so the chain holds exactly one node.
/// A response without an SOA record in the answer section is malformed.
pub fn parse_soa_reply(msg: &[u8]) -> Result<DataChain, Error> {
    let chain = parse_reply(msg, SoaReply::RTYPE, &[Class::IN], |record, chain| {
        if chain.is_empty() {
            chain.push(SoaReply::parse(record)?)
        } else {
            Ok(())
        }
    })?;
    if chain.is_empty() {
        debug!("SOA reply without SOA record");
        return Err(Error::BadResponse);
    }
    Ok(chain)
}

/// Parses a response to a NAPTR query.
pub fn parse_naptr_reply(msg: &[u8]) -> Result<DataChain, Error> {
    parse_reply(msg, NaptrReply::RTYPE, &[Class::IN], |record, chain| {
        chain.push(NaptrReply::parse(record)?)
    })
}

/// Parses a response to a URI query.
pub fn parse_uri_reply(msg: &[u8]) -> Result<DataChain, Error> {
    parse_reply(msg, UriReply::RTYPE, &[Class::IN], |record, chain| {
        chain.push(UriReply::parse(record)?)
    })
}

/// Stores the result of a query function and returns its status code.
///
/// On success, the chain is stored in `out` and [`Error::SUCCESS`] is
/// returned. On failure, `out` is set to `None` and the error’s legacy
/// code is returned.
pub fn store_reply(
    res: Result<DataChain, Error>,
    out: &mut Option<DataChain>,
) -> i32 {
    match res {
        Ok(chain) => {
            *out = Some(chain);
            Error::SUCCESS
        }
        Err(err) => {
            *out = None;
            err.to_code()
        }
    }
}

/// Runs `op` for every answer record of the given type and classes.
fn parse_reply(
    msg: &[u8],
    rtype: Rtype,
    classes: &[Class],
    mut op: impl FnMut(&AnswerRecord, &mut ChainBuilder) -> Result<(), Error>,
) -> Result<DataChain, Error> {
    let header = Header::parse(&mut Parser::from_ref(msg))?;
    if header.qdcount() != 1 {
        debug!("rejecting {} reply with {} questions", rtype, header.qdcount());
        return Err(Error::BadResponse);
    }
    if header.ancount() == 0 {
        return Err(Error::NoData);
    }
    let response = Response::parse(msg, NameMode::Hostname).map_err(|err| {
        debug!("rejecting {} reply: {}", rtype, err);
        Error::from(err)
    })?;

    let mut chain = ChainBuilder::new();
    for record in response.answers() {
        let record = record.map_err(|err| {
            debug!(
                "rejecting {} reply for {}: {}",
                rtype,
                response.question().qname(),
                err
            );
            Error::from(err)
        })?;
        if record.rtype() != rtype || !classes.contains(&record.class()) {
            trace!(
                "skipping {} {} record in {} reply",
                record.class(),
                record.rtype(),
                rtype
            );
            continue;
        }
        op(&record, &mut chain)?;
    }
    Ok(chain.finish())
}

//============ Testing =======================================================
